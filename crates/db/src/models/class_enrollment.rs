//! Class enrollment model: student membership in a class group.

use academy_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An enrollment row joined with the student's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassEnrollment {
    pub id: DbId,
    pub class_group_id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub enrolled_at: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for enrolling a student. `enrolled_at` defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassEnrollment {
    pub student_id: DbId,
    pub enrolled_at: Option<NaiveDate>,
}
