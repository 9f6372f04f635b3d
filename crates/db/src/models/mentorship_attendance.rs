//! Mentorship attendance model: at most one record per session.

use academy_core::types::{DbId, StatusId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mentorship_attendances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorshipAttendance {
    pub id: DbId,
    pub mentorship_session_id: DbId,
    pub status_id: StatusId,
    pub absence_notified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Normalized values for writing a session's attendance.
#[derive(Debug, Clone, Copy)]
pub struct UpsertMentorshipAttendance {
    pub status_id: StatusId,
    pub absence_notified: bool,
}
