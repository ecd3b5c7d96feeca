pub mod courses;
pub mod dashboard;
pub mod enrolments;
pub mod error;
pub mod learners;
pub mod progress;
pub mod store;
pub mod validation;
pub mod view;

pub mod types;

pub use crate::dashboard::Dashboard;
pub use crate::error::DashboardError;
pub use crate::store::Store;
