use crate::types::ids::{CourseId, EnrolmentId, LearnerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Enrolment {
    pub id: EnrolmentId,
    pub learner_id: LearnerId,
    pub course_id: CourseId,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An enrolment joined with the name of its course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolmentWithCourse {
    pub id: EnrolmentId,
    pub learner_id: LearnerId,
    pub course_id: CourseId,
    pub course_name: String,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
}
