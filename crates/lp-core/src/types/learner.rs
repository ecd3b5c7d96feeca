use crate::types::ids::LearnerId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Learner {
    pub id: LearnerId,
    pub firstname: String,
    pub lastname: String,
}

impl Learner {
    pub fn full_name(&self) -> String {
        full_name(&self.firstname, &self.lastname)
    }
}

/// Display name of a learner. Never stored, always derived.
pub fn full_name(firstname: &str, lastname: &str) -> String {
    format!("{firstname} {lastname}")
}
