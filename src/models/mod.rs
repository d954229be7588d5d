//! Data models for student records and session users.

pub mod student;
pub mod user;

pub use student::{CreateStudent, StudentRecord, StudentStatus, UpdateStudent, grade};
pub use user::{Credentials, Role, SessionUser};
