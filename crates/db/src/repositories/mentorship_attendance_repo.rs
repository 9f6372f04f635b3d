//! Repository for the `mentorship_attendances` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::mentorship_attendance::{MentorshipAttendance, UpsertMentorshipAttendance};

const COLUMNS: &str =
    "id, mentorship_session_id, status_id, absence_notified, created_at, updated_at";

/// Provides attendance recording for mentorship sessions.
pub struct MentorshipAttendanceRepo;

impl MentorshipAttendanceRepo {
    /// Find the attendance record of a session.
    pub async fn find_by_session(
        pool: &PgPool,
        mentorship_session_id: DbId,
    ) -> Result<Option<MentorshipAttendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorship_attendances WHERE mentorship_session_id = $1"
        );
        sqlx::query_as::<_, MentorshipAttendance>(&query)
            .bind(mentorship_session_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite a session's attendance record.
    pub async fn upsert(
        pool: &PgPool,
        mentorship_session_id: DbId,
        input: &UpsertMentorshipAttendance,
    ) -> Result<MentorshipAttendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentorship_attendances
                (mentorship_session_id, status_id, absence_notified)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_mentorship_attendances_session DO UPDATE SET
                status_id = EXCLUDED.status_id,
                absence_notified = EXCLUDED.absence_notified
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorshipAttendance>(&query)
            .bind(mentorship_session_id)
            .bind(input.status_id)
            .bind(input.absence_notified)
            .fetch_one(pool)
            .await
    }
}
