use crate::store::DbStore;
use lp_core::Dashboard;
use lp_core::error::DashboardError;
use lp_core::types::{CreateCourseInput, CreateLearnerInput, EnrolInput};
use tracing::info;

const COURSES: &[&str] = &[
    "Introduction to Rust",
    "Data Structures",
    "Web Accessibility",
    "Databases in Practice",
    "Technical Writing",
];

const LEARNERS: &[(&str, &str)] = &[
    ("Amara", "Okafor"),
    ("Jonas", "Lindqvist"),
    ("Priya", "Raman"),
    ("Mateo", "Alvarez"),
    ("Hannah", "Becker"),
    ("Kenji", "Watanabe"),
];

/// `(learner index, course index, progress)`. Kenji is left without
/// enrolments on purpose.
const ENROLMENTS: &[(usize, usize, f64)] = &[
    (0, 0, 92.0),
    (0, 1, 78.5),
    (0, 3, 64.0),
    (1, 0, 35.0),
    (1, 2, 48.0),
    (2, 1, 100.0),
    (2, 2, 88.0),
    (2, 4, 71.0),
    (3, 3, 12.5),
    (4, 0, 55.0),
    (4, 4, 83.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub courses: usize,
    pub learners: usize,
    pub enrolments: usize,
}

/// Deletes every row. Enrolments go first; cascades would remove them anyway.
pub fn reset(dashboard: &Dashboard<DbStore>) -> Result<(), DashboardError> {
    dashboard.transaction(|dashboard| {
        dashboard
            .store()
            .connection()
            .execute_batch("DELETE FROM enrolments; DELETE FROM learners; DELETE FROM courses;")
            .map_err(|err| DashboardError::Internal {
                message: err.to_string(),
            })?;
        info!("cleared learners, courses and enrolments");
        Ok(())
    })
}

/// Inserts the demo dataset in one transaction.
pub fn seed_demo(dashboard: &Dashboard<DbStore>) -> Result<SeedReport, DashboardError> {
    dashboard.transaction(|dashboard| {
        let mut course_ids = Vec::with_capacity(COURSES.len());
        for name in COURSES {
            let course = dashboard.courses().create(CreateCourseInput {
                name: (*name).to_string(),
            })?;
            course_ids.push(course.id);
        }

        let mut learner_ids = Vec::with_capacity(LEARNERS.len());
        for (firstname, lastname) in LEARNERS {
            let learner = dashboard.learners().create(CreateLearnerInput {
                firstname: (*firstname).to_string(),
                lastname: (*lastname).to_string(),
            })?;
            learner_ids.push(learner.id);
        }

        for &(learner, course, progress) in ENROLMENTS {
            dashboard.enrolments().enrol(EnrolInput {
                learner_id: learner_ids[learner],
                course_id: course_ids[course],
                progress,
            })?;
        }

        let report = SeedReport {
            courses: course_ids.len(),
            learners: learner_ids.len(),
            enrolments: ENROLMENTS.len(),
        };
        info!(
            courses = report.courses,
            learners = report.learners,
            enrolments = report.enrolments,
            "seeded demo data"
        );
        Ok(report)
    })
}
