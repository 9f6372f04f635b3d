//! Mentorship entity model and DTOs.

use academy_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A mentorship row from the `mentorships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mentorship {
    pub id: DbId,
    pub student_id: DbId,
    pub teacher_id: DbId,
    pub subject_id: Option<DbId>,
    pub hourly_rate: Decimal,
    pub status: String,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting a mentorship.
#[derive(Debug, Clone)]
pub struct CreateMentorship {
    pub student_id: DbId,
    pub teacher_id: DbId,
    pub subject_id: Option<DbId>,
    pub hourly_rate: Decimal,
    /// Defaults to `active` if omitted.
    pub status: Option<String>,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Validated values for updating a mentorship. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateMentorship {
    pub student_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
    /// `Some(None)` clears the subject.
    pub subject_id: Option<Option<DbId>>,
    pub hourly_rate: Option<Decimal>,
    pub status: Option<String>,
    pub started_at: Option<NaiveDate>,
    /// `Some(None)` reopens the mentorship.
    pub ended_at: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

/// Filters for listing mentorships.
#[derive(Debug, Clone, Default)]
pub struct MentorshipFilter {
    pub student_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
}
