//! Sidebar navigation and breadcrumbs shared by every page.

use lp_core::view::LEARNER_PROGRESS_PATH;
use serde::Serialize;

pub const HOME_PATH: &str = "/";

const NAV: &[(&str, &str)] = &[
    ("Dashboard", HOME_PATH),
    ("Learner Progress", LEARNER_PROGRESS_PATH),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub title: &'static str,
    pub href: &'static str,
}

pub fn nav_items(current_path: &str) -> Vec<NavItem> {
    NAV.iter()
        .map(|&(title, href)| NavItem {
            title,
            href,
            active: is_active(href, current_path),
        })
        .collect()
}

/// The root item only matches itself; others also match their sub-paths.
pub fn is_active(href: &str, current_path: &str) -> bool {
    if href == HOME_PATH {
        return current_path == HOME_PATH;
    }
    current_path == href
        || current_path
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn breadcrumbs(current_path: &str) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        title: "Dashboard",
        href: HOME_PATH,
    }];
    trail.extend(
        NAV.iter()
            .filter(|&&(_, href)| href != HOME_PATH && is_active(href, current_path))
            .map(|&(title, href)| Breadcrumb { title, href }),
    );
    trail
}
