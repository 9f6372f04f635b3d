//! Class group entity model and DTOs.
//!
//! A class group is a recurring course taught by one teacher in one
//! subject. Its weekly schedule is stored as a JSONB array of
//! `{weekday, start_time}` slots.

use academy_core::schedule::{TermBounds, WeeklySlot};
use academy_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A class group row from the `class_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassGroup {
    pub id: DbId,
    pub name: String,
    pub subject_id: DbId,
    pub teacher_id: DbId,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub default_duration_minutes: i32,
    pub weekly_schedule: Json<Vec<WeeklySlot>>,
    pub hourly_rate: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClassGroup {
    pub fn term(&self) -> TermBounds {
        TermBounds {
            start: self.term_start,
            end: self.term_end,
        }
    }
}

/// DTO for creating a new class group.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassGroup {
    pub name: String,
    pub subject_id: DbId,
    pub teacher_id: DbId,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub default_duration_minutes: i32,
    #[serde(default)]
    pub weekly_schedule: Vec<WeeklySlot>,
    pub hourly_rate: Decimal,
}

/// DTO for updating an existing class group. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClassGroup {
    pub name: Option<String>,
    pub subject_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
    pub default_duration_minutes: Option<i32>,
    pub weekly_schedule: Option<Vec<WeeklySlot>>,
    pub hourly_rate: Option<Decimal>,
}
