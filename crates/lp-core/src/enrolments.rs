use crate::error::EnrolmentError;
use crate::types::{CourseId, EnrolInput, Enrolment, EnrolmentId, EnrolmentWithCourse};

pub trait EnrolmentRepository {
    fn enrol(&self, input: EnrolInput) -> Result<Enrolment, EnrolmentError>;
    fn get(&self, id: EnrolmentId) -> Result<Option<Enrolment>, EnrolmentError>;
    fn update_progress(&self, id: EnrolmentId, progress: f64)
    -> Result<Enrolment, EnrolmentError>;
    /// Enrolments joined with their course name, ordered by learner, then
    /// creation time, then id. Restricted to one course when `course_id` is set.
    fn list_with_courses(
        &self,
        course_id: Option<CourseId>,
    ) -> Result<Vec<EnrolmentWithCourse>, EnrolmentError>;
}
