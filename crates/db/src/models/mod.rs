//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod attendance;
pub mod billing;
pub mod class_enrollment;
pub mod class_group;
pub mod class_lesson;
pub mod mentorship;
pub mod mentorship_attendance;
pub mod mentorship_payment;
pub mod mentorship_session;
pub mod status;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;
