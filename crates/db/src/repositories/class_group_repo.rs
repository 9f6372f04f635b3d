//! Repository for the `class_groups` table.

use academy_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::class_group::{ClassGroup, CreateClassGroup, UpdateClassGroup};

const COLUMNS: &str = "id, name, subject_id, teacher_id, term_start, term_end, \
                       default_duration_minutes, weekly_schedule, hourly_rate, \
                       created_at, updated_at";

/// Provides CRUD operations for class groups.
pub struct ClassGroupRepo;

impl ClassGroupRepo {
    /// Insert a new class group, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClassGroup) -> Result<ClassGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO class_groups
                (name, subject_id, teacher_id, term_start, term_end,
                 default_duration_minutes, weekly_schedule, hourly_rate)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassGroup>(&query)
            .bind(&input.name)
            .bind(input.subject_id)
            .bind(input.teacher_id)
            .bind(input.term_start)
            .bind(input.term_end)
            .bind(input.default_duration_minutes)
            .bind(Json(&input.weekly_schedule))
            .bind(input.hourly_rate)
            .fetch_one(pool)
            .await
    }

    /// Find a class group by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClassGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM class_groups WHERE id = $1");
        sqlx::query_as::<_, ClassGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List class groups, most recent term first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<ClassGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM class_groups
             ORDER BY term_start DESC, name, id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ClassGroup>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a class group. Only non-`None` fields in `input` are applied.
    ///
    /// Changing the schedule or term does not touch lessons already
    /// generated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClassGroup,
    ) -> Result<Option<ClassGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE class_groups SET
                name = COALESCE($2, name),
                subject_id = COALESCE($3, subject_id),
                teacher_id = COALESCE($4, teacher_id),
                term_start = COALESCE($5, term_start),
                term_end = COALESCE($6, term_end),
                default_duration_minutes = COALESCE($7, default_duration_minutes),
                weekly_schedule = COALESCE($8, weekly_schedule),
                hourly_rate = COALESCE($9, hourly_rate)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassGroup>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.subject_id)
            .bind(input.teacher_id)
            .bind(input.term_start)
            .bind(input.term_end)
            .bind(input.default_duration_minutes)
            .bind(input.weekly_schedule.as_ref().map(Json))
            .bind(input.hourly_rate)
            .fetch_optional(pool)
            .await
    }

    /// Delete a class group and, by cascade, its enrollments, lessons and
    /// attendance. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM class_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
