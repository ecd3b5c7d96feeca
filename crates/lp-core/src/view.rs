//! Derived state for the learner progress page.
//!
//! Everything the page shows is computed here from one
//! [`LearnerProgressPage`]: summary cards, per-row badges and bars, and the
//! navigation targets for the filter controls. Templates only lay it out.

use crate::progress::average_progress;
use crate::types::{
    CourseFilter, CourseId, LearnerProgress, LearnerProgressPage, ProgressFilters, SortDirection,
};
use serde::Serialize;
use url::form_urlencoded;

pub const LEARNER_PROGRESS_PATH: &str = "/learner-progress";
pub const EMPTY_STATE_MESSAGE: &str = "No learners found with the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    High,
    Medium,
    Low,
}

impl ProgressTier {
    pub fn for_progress(progress: f64) -> Self {
        if progress >= 80.0 {
            Self::High
        } else if progress >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "#c69930",
            Self::Medium => "#d4af37",
            Self::Low => "#8b7355",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::High => (0xc6, 0x99, 0x30),
            Self::Medium => (0xd4, 0xaf, 0x37),
            Self::Low => (0x8b, 0x73, 0x55),
        }
    }
}

/// The filter controls' state: raw query values as the user last sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub course_id: Option<String>,
    pub sort: Option<String>,
}

impl FilterState {
    pub fn from_filters(filters: &ProgressFilters) -> Self {
        Self {
            course_id: filled(filters.course_id.as_deref()),
            sort: filled(filters.sort.as_deref()),
        }
    }

    pub fn has_filters(&self) -> bool {
        self.course_id.is_some() || self.sort.is_some()
    }

    /// `None` selects "All Courses". The sort is carried over.
    #[must_use]
    pub fn select_course(&self, course_id: Option<CourseId>) -> Self {
        Self {
            course_id: course_id.map(|id| id.to_string()),
            sort: self.sort.clone(),
        }
    }

    /// Always cycles: `asc` becomes `desc`, everything else becomes `asc`.
    #[must_use]
    pub fn toggle_sort(&self) -> Self {
        let current = self.sort.as_deref().and_then(SortDirection::parse);
        let next = if current == Some(SortDirection::Asc) {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            course_id: self.course_id.clone(),
            sort: Some(next.as_str().to_string()),
        }
    }

    #[must_use]
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(course_id) = &self.course_id {
            serializer.append_pair("course_id", course_id);
        }
        if let Some(sort) = &self.sort {
            serializer.append_pair("sort", sort);
        }
        serializer.finish()
    }

    pub fn href(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            LEARNER_PROGRESS_PATH.to_string()
        } else {
            format!("{LEARNER_PROGRESS_PATH}?{query}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub learner_count: usize,
    pub course_count: usize,
    pub average_progress: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseOption {
    pub id: CourseId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrolmentBadge {
    pub course_id: CourseId,
    pub course_name: String,
    pub progress: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerRow {
    pub id: i64,
    pub name: String,
    pub badges: Vec<EnrolmentBadge>,
    pub average_progress: String,
    pub bar_width: String,
    pub bar_color: &'static str,
    pub tier: ProgressTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub courses: Vec<CourseOption>,
    pub all_courses_selected: bool,
    pub selected_course_name: Option<String>,
    /// Carried through the course selector form so a course change keeps it.
    pub sort: Option<String>,
    pub sort_arrow: Option<&'static str>,
    pub sort_label: Option<&'static str>,
    pub has_filters: bool,
    pub toggle_sort_href: String,
    pub clear_href: String,
    pub rows: Vec<LearnerRow>,
    pub empty_message: &'static str,
}

impl DashboardView {
    pub fn build(page: &LearnerProgressPage) -> Self {
        let state = FilterState::from_filters(&page.filters);
        let selected = CourseFilter::parse(state.course_id.as_deref()).course_id();
        let direction = state.sort.as_deref().and_then(SortDirection::parse);

        let courses: Vec<CourseOption> = page
            .courses
            .iter()
            .map(|course| CourseOption {
                id: course.id,
                name: course.name.clone(),
                selected: Some(course.id) == selected,
            })
            .collect();
        let selected_course_name = courses
            .iter()
            .find(|option| option.selected)
            .map(|option| option.name.clone());

        Self {
            summary: SummaryView {
                learner_count: page.learners.len(),
                course_count: page.courses.len(),
                average_progress: format!("{:.1}", overall_average(&page.learners)),
            },
            all_courses_selected: selected_course_name.is_none(),
            selected_course_name,
            courses,
            sort: state.sort.clone(),
            sort_arrow: direction.map(|d| match d {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            }),
            sort_label: direction.map(|d| match d {
                SortDirection::Asc => "Low to High",
                SortDirection::Desc => "High to Low",
            }),
            has_filters: state.has_filters(),
            toggle_sort_href: state.toggle_sort().href(),
            clear_href: FilterState::clear().href(),
            rows: page.learners.iter().map(learner_row).collect(),
            empty_message: EMPTY_STATE_MESSAGE,
        }
    }
}

/// Mean of the learners' averages, unweighted by enrolment count.
pub fn overall_average(learners: &[LearnerProgress]) -> f64 {
    average_progress(learners.iter().map(|learner| learner.average_progress))
}

/// Bar width in percent, clamped to `0..=100`.
pub fn bar_width(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// Badge text: whole numbers without a fraction, others as-is.
pub fn format_percent(progress: f64) -> String {
    format!("{progress}%")
}

fn learner_row(learner: &LearnerProgress) -> LearnerRow {
    let tier = ProgressTier::for_progress(learner.average_progress);
    LearnerRow {
        id: learner.id.get(),
        name: learner.name.clone(),
        badges: learner
            .enrolments
            .iter()
            .map(|enrolment| EnrolmentBadge {
                course_id: enrolment.course_id,
                course_name: enrolment.course_name.clone(),
                progress: format_percent(enrolment.progress),
            })
            .collect(),
        average_progress: format!("{:.1}", learner.average_progress),
        bar_width: format!("{:.1}", bar_width(learner.average_progress)),
        bar_color: tier.color(),
        tier,
    }
}

fn filled(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
