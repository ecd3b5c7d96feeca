use crate::error::{CourseError, EnrolmentError, LearnerError};

pub const MIN_PROGRESS: f64 = 0.0;
pub const MAX_PROGRESS: f64 = 100.0;

pub fn validate_progress(value: f64) -> Result<f64, EnrolmentError> {
    if !value.is_finite() || !(MIN_PROGRESS..=MAX_PROGRESS).contains(&value) {
        return Err(EnrolmentError::InvalidProgress { value });
    }
    Ok(value)
}

pub fn validate_course_name(name: &str) -> Result<String, CourseError> {
    non_blank(name).ok_or_else(|| CourseError::InvalidInput {
        message: "course name must not be empty".to_string(),
    })
}

pub fn validate_learner_name(field: &str, value: &str) -> Result<String, LearnerError> {
    non_blank(value).ok_or_else(|| LearnerError::InvalidInput {
        message: format!("{field} must not be empty"),
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
