use crate::error::LearnerError;
use crate::types::{CreateLearnerInput, Learner, LearnerId};

pub trait LearnerRepository {
    fn create(&self, input: CreateLearnerInput) -> Result<Learner, LearnerError>;
    fn get(&self, id: LearnerId) -> Result<Option<Learner>, LearnerError>;
    /// All learners in id order.
    fn list(&self) -> Result<Vec<Learner>, LearnerError>;
    /// Removes the learner and, by cascade, their enrolments.
    fn delete(&self, id: LearnerId) -> Result<(), LearnerError>;
}
