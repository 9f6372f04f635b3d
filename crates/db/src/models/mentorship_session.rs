//! Mentorship session model: one dated 1:1 tutoring occurrence.

use academy_core::types::{DbId, StatusId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::billing::MentorshipDebit;

/// A session row from the `mentorship_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorshipSession {
    pub id: DbId,
    pub mentorship_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status_id: StatusId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting a session.
///
/// `status_id` may only be scheduled or cancelled here; completion goes
/// through the completion workflow so that the debit is written.
#[derive(Debug, Clone)]
pub struct CreateMentorshipSession {
    pub mentorship_id: DbId,
    pub session_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status_id: StatusId,
    pub notes: Option<String>,
}

/// Validated values for updating a session. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateMentorshipSession {
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

impl UpdateMentorshipSession {
    /// Whether the date, time or duration changes. A completed session's
    /// duration is what its debit was computed from, so only scheduled
    /// sessions may be rescheduled.
    pub fn reschedules(&self) -> bool {
        self.session_date.is_some() || self.start_time.is_some() || self.duration_minutes.is_some()
    }
}

/// Result of completing a session: the updated row and the debit it produced.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedSession {
    pub session: MentorshipSession,
    pub debit: MentorshipDebit,
}
