//! Teacher entity model and DTOs.
//!
//! Every teacher owns exactly one user account; the email lives on the
//! account and is joined into the teacher row on read.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A teacher row joined with its user's email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Teacher {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a teacher together with its user account.
#[derive(Debug, Clone)]
pub struct CreateTeacher {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for updating a teacher. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeacher {
    pub name: Option<String>,
    pub email: Option<String>,
}
