//! Campus API: course and student registry REST backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use models::{Course, Student};
pub use routes::{app, common_routes, common_routes_with_ready, course_routes, student_routes};
pub use service::{CourseService, StudentService};
pub use state::AppState;
pub use store::{connect, ensure_schema};
