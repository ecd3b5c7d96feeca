use lp_core::types::LearnerProgressPage;
use lp_core::view::{DashboardView, ProgressTier, bar_width};
use owo_colors::{OwoColorize, Stream};
use std::io::{self, Write};

const BAR_CELLS: usize = 20;

/// Writes the progress table for `page`. With `colored`, bars and averages
/// take their tier color when stdout supports it.
pub fn write_report(
    out: &mut impl Write,
    page: &LearnerProgressPage,
    colored: bool,
) -> io::Result<()> {
    let view = DashboardView::build(page);

    let title = "Learner Progress Dashboard";
    if colored {
        writeln!(out, "{}", title.if_supports_color(Stream::Stdout, |text| text.bold()))?;
    } else {
        writeln!(out, "{title}")?;
    }
    let mut active = Vec::new();
    if let Some(name) = &view.selected_course_name {
        active.push(format!("Course: {name}"));
    }
    if let Some(label) = view.sort_label {
        active.push(format!("Sorted: {label}"));
    }
    if !active.is_empty() {
        writeln!(out, "{}", active.join("  "))?;
    }
    writeln!(
        out,
        "Learners: {}  Courses: {}  Average: {}%",
        view.summary.learner_count, view.summary.course_count, view.summary.average_progress
    )?;
    writeln!(out)?;

    if view.rows.is_empty() {
        writeln!(out, "{}", view.empty_message)?;
        return Ok(());
    }

    let name_width = view
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);
    for (row, learner) in view.rows.iter().zip(&page.learners) {
        let bar = bar(bar_width(learner.average_progress));
        writeln!(
            out,
            "{:<name_width$}  {}  {:>6}",
            row.name,
            paint(&bar, row.tier, colored),
            paint(&format!("{}%", row.average_progress), row.tier, colored),
        )?;
        if !row.badges.is_empty() {
            let badges: Vec<String> = row
                .badges
                .iter()
                .map(|badge| format!("{} {}", badge.course_name, badge.progress))
                .collect();
            writeln!(out, "{:<name_width$}  {}", "", badges.join(", "))?;
        }
    }
    Ok(())
}

fn bar(width: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let filled = ((width / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn paint(text: &str, tier: ProgressTier, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    let (r, g, b) = tier.rgb();
    text.if_supports_color(Stream::Stdout, |text| text.truecolor(r, g, b))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::types::{
        Course, CourseId, EnrolmentProgress, LearnerId, LearnerProgress, ProgressFilters,
    };

    fn page(filters: ProgressFilters, learners: Vec<LearnerProgress>) -> LearnerProgressPage {
        LearnerProgressPage {
            learners,
            courses: vec![Course {
                id: CourseId::new(1),
                name: "Rust".to_string(),
            }],
            filters,
        }
    }

    fn learner(id: i64, first: &str, progress: Option<f64>) -> LearnerProgress {
        let enrolments: Vec<EnrolmentProgress> = progress
            .map(|progress| EnrolmentProgress {
                course_id: CourseId::new(1),
                course_name: "Rust".to_string(),
                progress,
            })
            .into_iter()
            .collect();
        LearnerProgress {
            id: LearnerId::new(id),
            name: format!("{first} Tester"),
            firstname: first.to_string(),
            lastname: "Tester".to_string(),
            enrolments,
            average_progress: progress.unwrap_or(0.0),
        }
    }

    fn render(page: &LearnerProgressPage) -> String {
        let mut out = Vec::new();
        write_report(&mut out, page, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rows_show_bar_average_and_badges() {
        let output = render(&page(
            ProgressFilters::default(),
            vec![learner(1, "Ada", Some(75.0)), learner(2, "Bo", None)],
        ));

        assert!(output.contains("Learners: 2  Courses: 1  Average: 37.5%"));
        assert!(output.contains("Ada Tester  [###############.....]   75.0%"));
        assert!(output.contains("Rust 75%"));
        assert!(output.contains("Bo Tester   [....................]    0.0%"));
    }

    #[test]
    fn active_filters_are_listed() {
        let output = render(&page(
            ProgressFilters::new(Some("1"), Some("desc")),
            vec![learner(1, "Ada", Some(90.0))],
        ));
        assert!(output.contains("Course: Rust  Sorted: High to Low"));
    }

    #[test]
    fn empty_page_prints_empty_state() {
        let output = render(&page(ProgressFilters::new(Some("7"), None), Vec::new()));
        assert!(output.contains("No learners found with the selected filters."));
        assert!(output.contains("Average: 0.0%"));
    }

    #[test]
    fn bar_is_clamped() {
        assert_eq!(bar(0.0), format!("[{}]", ".".repeat(BAR_CELLS)));
        assert_eq!(bar(100.0), format!("[{}]", "#".repeat(BAR_CELLS)));
    }
}
