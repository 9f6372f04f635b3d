//! Class lesson model: one dated occurrence of a class group.

use academy_core::types::{DbId, StatusId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

/// A lesson row from the `class_lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassLesson {
    pub id: DbId,
    pub class_group_id: DbId,
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status_id: StatusId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting a lesson (always starts `scheduled`).
#[derive(Debug, Clone)]
pub struct CreateClassLesson {
    pub class_group_id: DbId,
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

/// Validated values for updating a lesson. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateClassLesson {
    pub lesson_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

impl UpdateClassLesson {
    /// Whether the date, time or duration changes. Only a scheduled lesson
    /// may be rescheduled.
    pub fn reschedules(&self) -> bool {
        self.lesson_date.is_some() || self.start_time.is_some() || self.duration_minutes.is_some()
    }
}

/// Filters for listing a group's lessons.
#[derive(Debug, Clone, Default)]
pub struct ClassLessonFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status_id: Option<StatusId>,
}

/// Outcome of a bulk generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLessons {
    pub created_count: usize,
    pub skipped_count: usize,
    pub created: Vec<ClassLesson>,
}
