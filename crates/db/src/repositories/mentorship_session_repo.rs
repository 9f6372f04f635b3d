//! Repository for the `mentorship_sessions` table, including the
//! completion workflow that debits the mentorship.

use academy_core::billing::debit_hours;
use academy_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::billing::MentorshipDebit;
use crate::models::mentorship_session::{
    CompletedSession, CreateMentorshipSession, MentorshipSession, UpdateMentorshipSession,
};
use crate::models::status::{AttendanceStatus, LessonStatus};
use crate::repositories::billing_repo::DEBIT_COLUMNS;

const COLUMNS: &str = "id, mentorship_id, session_date, start_time, duration_minutes, \
                       status_id, notes, created_at, updated_at";

/// Provides CRUD and lifecycle operations for mentorship sessions.
pub struct MentorshipSessionRepo;

impl MentorshipSessionRepo {
    /// Insert a new session.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMentorshipSession,
    ) -> Result<MentorshipSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentorship_sessions
                (mentorship_id, session_date, start_time, duration_minutes, status_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(input.mentorship_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(input.status_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID, scoped to its mentorship.
    pub async fn find_scoped(
        pool: &PgPool,
        mentorship_id: DbId,
        id: DbId,
    ) -> Result<Option<MentorshipSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorship_sessions WHERE id = $1 AND mentorship_id = $2"
        );
        sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(id)
            .bind(mentorship_id)
            .fetch_optional(pool)
            .await
    }

    /// List a mentorship's sessions, most recent first.
    pub async fn list_by_mentorship(
        pool: &PgPool,
        mentorship_id: DbId,
    ) -> Result<Vec<MentorshipSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorship_sessions
             WHERE mentorship_id = $1
             ORDER BY session_date DESC, start_time DESC, id DESC"
        );
        sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(mentorship_id)
            .fetch_all(pool)
            .await
    }

    /// Update a session's date, time, duration or notes.
    ///
    /// A reschedule only applies while the session is still scheduled;
    /// `None` means the row is gone or, for a reschedule, no longer
    /// scheduled. Notes alone may change in any status.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMentorshipSession,
    ) -> Result<Option<MentorshipSession>, sqlx::Error> {
        let query = format!(
            "UPDATE mentorship_sessions SET
                session_date = COALESCE($2, session_date),
                start_time = COALESCE($3, start_time),
                duration_minutes = COALESCE($4, duration_minutes),
                notes = COALESCE($5, notes)
             WHERE id = $1 AND (NOT $6 OR status_id = $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(&input.notes)
            .bind(input.reschedules())
            .bind(LessonStatus::Scheduled.id())
            .fetch_optional(pool)
            .await
    }

    /// Cancel a scheduled session.
    ///
    /// Returns `None` when the session is not currently scheduled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<MentorshipSession>, sqlx::Error> {
        let query = format!(
            "UPDATE mentorship_sessions SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(id)
            .bind(LessonStatus::Cancelled.id())
            .bind(LessonStatus::Scheduled.id())
            .fetch_optional(pool)
            .await
    }

    /// Insert a session that is already completed: the row, its debit and
    /// its default attendance are written in one transaction.
    pub async fn create_completed(
        pool: &PgPool,
        input: &CreateMentorshipSession,
    ) -> Result<CompletedSession, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO mentorship_sessions
                (mentorship_id, session_date, start_time, duration_minutes, status_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let scheduled = sqlx::query_as::<_, MentorshipSession>(&query)
            .bind(input.mentorship_id)
            .bind(input.session_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(LessonStatus::Scheduled.id())
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let completed = complete_on(&mut *tx, scheduled.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(completed)
    }

    /// Complete a scheduled session in one transaction:
    ///
    /// 1. Guarded status update (`scheduled` -> `completed`).
    /// 2. Insert the session's hour debit (`duration_minutes / 60`).
    /// 3. Seed a `present` attendance record if none exists.
    ///
    /// Returns `None` when the session is not currently scheduled. Of two
    /// concurrent completions only one matches the guarded update; the
    /// other waits on the row lock and then matches nothing. The unique
    /// constraint `uq_mentorship_debits_session` backs this up.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<CompletedSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let completed = complete_on(&mut *tx, id).await?;
        if completed.is_some() {
            tx.commit().await?;
        }
        Ok(completed)
    }

    /// Delete a session scoped to its mentorship. Its attendance and debit
    /// cascade, returning the debited hours to the balance.
    pub async fn delete_scoped(
        pool: &PgPool,
        mentorship_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM mentorship_sessions WHERE id = $1 AND mentorship_id = $2")
                .bind(id)
                .bind(mentorship_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// The completion steps, run on a connection that is already inside a
/// transaction.
async fn complete_on(
    conn: &mut PgConnection,
    id: DbId,
) -> Result<Option<CompletedSession>, sqlx::Error> {
    let query = format!(
        "UPDATE mentorship_sessions SET status_id = $2
         WHERE id = $1 AND status_id = $3
         RETURNING {COLUMNS}"
    );
    let session = sqlx::query_as::<_, MentorshipSession>(&query)
        .bind(id)
        .bind(LessonStatus::Completed.id())
        .bind(LessonStatus::Scheduled.id())
        .fetch_optional(&mut *conn)
        .await?;

    let Some(session) = session else {
        return Ok(None);
    };

    let debit_query = format!(
        "INSERT INTO mentorship_debits (mentorship_id, mentorship_session_id, hours)
         VALUES ($1, $2, $3)
         RETURNING {DEBIT_COLUMNS}"
    );
    let debit = sqlx::query_as::<_, MentorshipDebit>(&debit_query)
        .bind(session.mentorship_id)
        .bind(session.id)
        .bind(debit_hours(session.duration_minutes))
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query(
        "INSERT INTO mentorship_attendances (mentorship_session_id, status_id, absence_notified)
         VALUES ($1, $2, false)
         ON CONFLICT ON CONSTRAINT uq_mentorship_attendances_session DO NOTHING",
    )
    .bind(session.id)
    .bind(AttendanceStatus::Present.id())
    .execute(&mut *conn)
    .await?;

    tracing::debug!(session_id = session.id, hours = %debit.hours, "Session debited");
    Ok(Some(CompletedSession { session, debit }))
}
