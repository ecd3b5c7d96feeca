use crate::types::course::Course;
use crate::types::ids::{CourseId, LearnerId};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrolmentProgress {
    pub course_id: CourseId,
    pub course_name: String,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LearnerProgress {
    pub id: LearnerId,
    pub name: String,
    pub firstname: String,
    pub lastname: String,
    pub enrolments: Vec<EnrolmentProgress>,
    pub average_progress: f64,
}

/// Raw `course_id`/`sort` query values, echoed back unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressFilters {
    /// Course identifier to restrict learners and enrolments to.
    #[serde(default)]
    pub course_id: Option<String>,
    /// `asc` or `desc`; any other value leaves learners in id order.
    #[serde(default)]
    pub sort: Option<String>,
}

impl ProgressFilters {
    pub fn new(course_id: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            course_id: course_id.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    /// Reads `course_id`/`sort` from a raw query string. Repeated keys keep
    /// the last value; unknown keys are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut filters = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "course_id" => filters.course_id = Some(value.into_owned()),
                "sort" => filters.sort = Some(value.into_owned()),
                _ => {}
            }
        }
        filters
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LearnerProgressPage {
    pub learners: Vec<LearnerProgress>,
    pub courses: Vec<Course>,
    pub filters: ProgressFilters,
}
