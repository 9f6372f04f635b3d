//! Subject entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subject row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new subject.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing subject. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub description: Option<String>,
}
