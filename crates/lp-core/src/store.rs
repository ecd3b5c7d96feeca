use crate::DashboardError;
use crate::courses::CourseRepository;
use crate::enrolments::EnrolmentRepository;
use crate::learners::LearnerRepository;

pub trait Store {
    type Courses<'a>: CourseRepository
    where
        Self: 'a;
    type Learners<'a>: LearnerRepository
    where
        Self: 'a;
    type Enrolments<'a>: EnrolmentRepository
    where
        Self: 'a;

    fn courses(&self) -> Self::Courses<'_>;
    fn learners(&self) -> Self::Learners<'_>;
    fn enrolments(&self) -> Self::Enrolments<'_>;

    fn with_tx<F, T>(&self, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>;

    /// Runs `f` against one consistent read snapshot. Inside an open
    /// transaction `f` joins it.
    fn with_read_tx<F, T>(&self, f: F) -> Result<T, DashboardError>
    where
        F: FnOnce(&Self) -> Result<T, DashboardError>;
}
