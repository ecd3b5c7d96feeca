//! Learner progress aggregation.
//!
//! Turns learner rows and course-joined enrolment rows into one projection per
//! learner carrying the (course-filtered) enrolment list and its mean
//! progress. Pure: the store is queried by [`crate::dashboard`], not here.

use crate::types::{
    CourseFilter, EnrolmentProgress, EnrolmentWithCourse, Learner, LearnerId, LearnerProgress,
    ProgressQuery, SortDirection,
};
use std::collections::HashMap;

/// Builds the per-learner projection for `query`.
///
/// - `CourseFilter::Only` keeps only learners with at least one enrolment in
///   that course and only those enrolments.
/// - `CourseFilter::Unmatched` yields no learners.
/// - Without a sort direction learners stay in id order; sorting is stable so
///   learners with equal averages also keep id order.
pub fn aggregate(
    mut learners: Vec<Learner>,
    enrolments: Vec<EnrolmentWithCourse>,
    query: &ProgressQuery,
) -> Vec<LearnerProgress> {
    let course = match query.course {
        CourseFilter::All => None,
        CourseFilter::Only(id) => Some(id),
        CourseFilter::Unmatched => return Vec::new(),
    };

    let mut by_learner: HashMap<LearnerId, Vec<EnrolmentWithCourse>> = HashMap::new();
    for enrolment in enrolments {
        if course.is_some_and(|id| enrolment.course_id != id) {
            continue;
        }
        by_learner
            .entry(enrolment.learner_id)
            .or_default()
            .push(enrolment);
    }

    learners.sort_by_key(|learner| learner.id);
    let mut rows: Vec<LearnerProgress> = learners
        .into_iter()
        .filter_map(|learner| {
            let owned = by_learner.remove(&learner.id).unwrap_or_default();
            if course.is_some() && owned.is_empty() {
                return None;
            }
            Some(project(learner, owned))
        })
        .collect();

    if let Some(direction) = query.sort {
        sort_by_average(&mut rows, direction);
    }
    rows
}

/// Arithmetic mean, `0.0` for an empty input.
pub fn average_progress<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

pub fn sort_by_average(rows: &mut [LearnerProgress], direction: SortDirection) {
    match direction {
        SortDirection::Asc => {
            rows.sort_by(|a, b| a.average_progress.total_cmp(&b.average_progress));
        }
        SortDirection::Desc => {
            rows.sort_by(|a, b| b.average_progress.total_cmp(&a.average_progress));
        }
    }
}

fn project(learner: Learner, mut enrolments: Vec<EnrolmentWithCourse>) -> LearnerProgress {
    enrolments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let average_progress = average_progress(enrolments.iter().map(|e| e.progress));
    let name = learner.full_name();
    LearnerProgress {
        id: learner.id,
        name,
        firstname: learner.firstname,
        lastname: learner.lastname,
        enrolments: enrolments
            .into_iter()
            .map(|enrolment| EnrolmentProgress {
                course_id: enrolment.course_id,
                course_name: enrolment.course_name,
                progress: enrolment.progress,
            })
            .collect(),
        average_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, EnrolmentId};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn learner(id: i64, firstname: &str, lastname: &str) -> Learner {
        Learner {
            id: LearnerId::new(id),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        }
    }

    fn enrolment(id: i64, learner_id: i64, course_id: i64, progress: f64) -> EnrolmentWithCourse {
        EnrolmentWithCourse {
            id: EnrolmentId::new(id),
            learner_id: LearnerId::new(learner_id),
            course_id: CourseId::new(course_id),
            course_name: format!("Course {course_id}"),
            progress,
            created_at: t0() + Duration::minutes(id),
        }
    }

    /// A: course 1 (80) + course 2 (40); B: nothing; C: course 2 (90).
    fn fixture() -> (Vec<Learner>, Vec<EnrolmentWithCourse>) {
        (
            vec![
                learner(1, "Ada", "Lovelace"),
                learner(2, "Brian", "Kernighan"),
                learner(3, "Grace", "Hopper"),
            ],
            vec![
                enrolment(1, 1, 1, 80.0),
                enrolment(2, 1, 2, 40.0),
                enrolment(3, 3, 2, 90.0),
            ],
        )
    }

    fn ids(rows: &[LearnerProgress]) -> Vec<i64> {
        rows.iter().map(|row| row.id.get()).collect()
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_progress(Vec::new()), 0.0);
        assert_eq!(average_progress([50.0, 75.0]), 62.5);
    }

    #[test]
    fn unfiltered_average_spans_all_enrolments() {
        let (learners, enrolments) = fixture();
        let rows = aggregate(learners, enrolments, &ProgressQuery::default());

        let ada = &rows[0];
        assert_eq!(ada.name, "Ada Lovelace");
        assert_eq!(ada.enrolments.len(), 2);
        assert!((ada.average_progress - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn learner_without_enrolments_is_listed_with_zero() {
        let (learners, enrolments) = fixture();
        let rows = aggregate(learners, enrolments, &ProgressQuery::default());

        assert_eq!(ids(&rows), vec![1, 2, 3]);
        let brian = &rows[1];
        assert!(brian.enrolments.is_empty());
        assert_eq!(brian.average_progress, 0.0);
    }

    #[test]
    fn course_filter_restricts_learners_and_enrolments() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::Only(CourseId::new(1)), None);
        let rows = aggregate(learners, enrolments, &query);

        assert_eq!(ids(&rows), vec![1]);
        assert_eq!(
            rows[0].enrolments,
            vec![EnrolmentProgress {
                course_id: CourseId::new(1),
                course_name: "Course 1".to_string(),
                progress: 80.0,
            }]
        );
        assert!((rows[0].average_progress - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_filtered_enrolment_belongs_to_the_course() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::Only(CourseId::new(2)), None);
        let rows = aggregate(learners, enrolments, &query);

        assert_eq!(ids(&rows), vec![1, 3]);
        assert!(
            rows.iter()
                .flat_map(|row| &row.enrolments)
                .all(|e| e.course_id == CourseId::new(2))
        );
    }

    #[test]
    fn unknown_course_yields_no_learners() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::Only(CourseId::new(99)), None);
        assert!(aggregate(learners.clone(), enrolments.clone(), &query).is_empty());

        let query = ProgressQuery::new(CourseFilter::Unmatched, None);
        assert!(aggregate(learners, enrolments, &query).is_empty());
    }

    #[test]
    fn sort_desc_puts_highest_average_first() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::All, Some(SortDirection::Desc));
        let rows = aggregate(learners, enrolments, &query);

        assert_eq!(ids(&rows), vec![3, 1, 2]);
        assert!(
            rows.windows(2)
                .all(|w| w[0].average_progress >= w[1].average_progress)
        );
    }

    #[test]
    fn sort_asc_is_non_decreasing() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::All, Some(SortDirection::Asc));
        let rows = aggregate(learners, enrolments, &query);

        assert_eq!(ids(&rows), vec![2, 1, 3]);
        assert!(
            rows.windows(2)
                .all(|w| w[0].average_progress <= w[1].average_progress)
        );
    }

    #[test]
    fn equal_averages_keep_id_order() {
        let learners = vec![learner(2, "B", "B"), learner(1, "A", "A")];
        let enrolments = vec![enrolment(1, 1, 1, 50.0), enrolment(2, 2, 1, 50.0)];
        let query = ProgressQuery::new(CourseFilter::All, Some(SortDirection::Desc));

        assert_eq!(ids(&aggregate(learners, enrolments, &query)), vec![1, 2]);
    }

    #[test]
    fn enrolments_follow_creation_order() {
        let learners = vec![learner(1, "A", "A")];
        let mut late = enrolment(1, 1, 7, 10.0);
        late.created_at = t0() + Duration::days(2);
        let early = enrolment(2, 1, 3, 20.0);
        let rows = aggregate(learners, vec![late, early], &ProgressQuery::default());

        let courses: Vec<i64> = rows[0].enrolments.iter().map(|e| e.course_id.get()).collect();
        assert_eq!(courses, vec![3, 7]);
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let (learners, enrolments) = fixture();
        let query = ProgressQuery::new(CourseFilter::All, Some(SortDirection::Asc));
        let first = aggregate(learners.clone(), enrolments.clone(), &query);
        let second = aggregate(learners, enrolments, &query);
        assert_eq!(first, second);
    }
}
