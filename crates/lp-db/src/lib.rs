pub mod course_repo;
pub mod enrolment_repo;
pub mod learner_repo;
pub mod schema;
pub mod seed;
pub mod store;
pub mod util;
