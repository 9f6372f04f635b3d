//! Repository for the `mentorships` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::mentorship::{
    CreateMentorship, Mentorship, MentorshipFilter, UpdateMentorship,
};

const COLUMNS: &str = "id, student_id, teacher_id, subject_id, hourly_rate, status, \
                       started_at, ended_at, notes, created_at, updated_at";

/// Provides CRUD operations for mentorships.
pub struct MentorshipRepo;

impl MentorshipRepo {
    /// Insert a new mentorship. `status` defaults to `active`.
    pub async fn create(pool: &PgPool, input: &CreateMentorship) -> Result<Mentorship, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentorships
                (student_id, teacher_id, subject_id, hourly_rate, status,
                 started_at, ended_at, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'active'), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentorship>(&query)
            .bind(input.student_id)
            .bind(input.teacher_id)
            .bind(input.subject_id)
            .bind(input.hourly_rate)
            .bind(&input.status)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a mentorship by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mentorship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mentorships WHERE id = $1");
        sqlx::query_as::<_, Mentorship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List mentorships, newest first, optionally by student and/or teacher.
    pub async fn list(
        pool: &PgPool,
        filter: &MentorshipFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Mentorship>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorships
             WHERE ($1::BIGINT IS NULL OR student_id = $1)
               AND ($2::BIGINT IS NULL OR teacher_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Mentorship>(&query)
            .bind(filter.student_id)
            .bind(filter.teacher_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a mentorship. Only non-`None` fields in `input` are applied;
    /// `subject_id` and `ended_at` can also be cleared.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMentorship,
    ) -> Result<Option<Mentorship>, sqlx::Error> {
        let query = format!(
            "UPDATE mentorships SET
                student_id = COALESCE($2, student_id),
                teacher_id = COALESCE($3, teacher_id),
                subject_id = CASE WHEN $4 THEN $5 ELSE subject_id END,
                hourly_rate = COALESCE($6, hourly_rate),
                status = COALESCE($7, status),
                started_at = COALESCE($8, started_at),
                ended_at = CASE WHEN $9 THEN $10 ELSE ended_at END,
                notes = COALESCE($11, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mentorship>(&query)
            .bind(id)
            .bind(input.student_id)
            .bind(input.teacher_id)
            .bind(input.subject_id.is_some())
            .bind(input.subject_id.flatten())
            .bind(input.hourly_rate)
            .bind(&input.status)
            .bind(input.started_at)
            .bind(input.ended_at.is_some())
            .bind(input.ended_at.flatten())
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a mentorship and, by cascade, its sessions, attendance,
    /// payments and debits. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mentorships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
