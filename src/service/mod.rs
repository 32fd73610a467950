//! Resource services executing SQL against the store.

mod courses;
mod students;
pub use courses::CourseService;
pub use students::StudentService;
