//! Class attendance model: one record per (lesson, student).

use academy_core::types::{DbId, StatusId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An attendance row from the `attendances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub class_lesson_id: DbId,
    pub student_id: DbId,
    pub status_id: StatusId,
    pub absence_notified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One enrolled student of a lesson's group with their attendance, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub student_id: DbId,
    pub student_name: String,
    pub attendance_id: Option<DbId>,
    pub status_id: Option<StatusId>,
    pub absence_notified: Option<bool>,
}

/// Normalized values for writing one attendance record.
#[derive(Debug, Clone, Copy)]
pub struct UpsertAttendance {
    pub student_id: DbId,
    pub status_id: StatusId,
    pub absence_notified: bool,
}
