use crate::error::CourseError;
use crate::types::{Course, CourseId, CreateCourseInput};

pub trait CourseRepository {
    fn create(&self, input: CreateCourseInput) -> Result<Course, CourseError>;
    fn get(&self, id: CourseId) -> Result<Option<Course>, CourseError>;
    /// All courses, alphabetically by name, ties broken by id.
    fn list(&self) -> Result<Vec<Course>, CourseError>;
    fn rename(&self, id: CourseId, name: String) -> Result<Course, CourseError>;
    /// Removes the course and, by cascade, its enrolments.
    fn delete(&self, id: CourseId) -> Result<(), CourseError>;
}
