pub mod course;
pub mod enrolment;
pub mod ids;
pub mod io;
pub mod learner;
pub mod progress;
pub mod query;

pub use course::Course;
pub use enrolment::{Enrolment, EnrolmentWithCourse};
pub use ids::{CourseId, EnrolmentId, IdError, LearnerId};
pub use io::{CreateCourseInput, CreateLearnerInput, EnrolInput};
pub use learner::{Learner, full_name};
pub use progress::{EnrolmentProgress, LearnerProgress, LearnerProgressPage, ProgressFilters};
pub use query::{CourseFilter, ProgressQuery, SortDirection};
