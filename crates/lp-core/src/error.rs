use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum LearnerError {
    #[error("learner not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum EnrolmentError {
    #[error("enrolment not found")]
    NotFound,
    #[error("learner not found")]
    LearnerNotFound,
    #[error("course not found")]
    CourseNotFound,
    #[error("learner already enrolled in course")]
    AlreadyEnrolled,
    #[error("progress must be between 0 and 100, got {value}")]
    InvalidProgress { value: f64 },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Learner(#[from] LearnerError),
    #[error(transparent)]
    Enrolment(#[from] EnrolmentError),
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DashboardError {
    /// True when the failure came from the data store rather than the caller.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Course(CourseError::Storage { .. })
                | Self::Learner(LearnerError::Storage { .. })
                | Self::Enrolment(EnrolmentError::Storage { .. })
                | Self::Internal { .. }
        )
    }
}
