//! Repository for the `class_enrollments` table.

use academy_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::class_enrollment::ClassEnrollment;

/// Enrollment columns joined with the student's name (`e` / `s` aliases).
const COLUMNS: &str = "e.id, e.class_group_id, e.student_id, s.name AS student_name, \
                       e.enrolled_at, e.created_at, e.updated_at";

/// Provides operations for class group membership.
pub struct ClassEnrollmentRepo;

impl ClassEnrollmentRepo {
    /// Enroll a student. `enrolled_at` defaults to today.
    ///
    /// A second enrollment of the same student fails on
    /// `uq_class_enrollments_group_student`.
    pub async fn create(
        pool: &PgPool,
        class_group_id: DbId,
        student_id: DbId,
        enrolled_at: Option<NaiveDate>,
    ) -> Result<ClassEnrollment, sqlx::Error> {
        let query = format!(
            "WITH e AS (
                INSERT INTO class_enrollments (class_group_id, student_id, enrolled_at)
                VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
                RETURNING id, class_group_id, student_id, enrolled_at, created_at, updated_at
             )
             SELECT {COLUMNS} FROM e JOIN students s ON s.id = e.student_id"
        );
        sqlx::query_as::<_, ClassEnrollment>(&query)
            .bind(class_group_id)
            .bind(student_id)
            .bind(enrolled_at)
            .fetch_one(pool)
            .await
    }

    /// List a group's enrollments ordered by student name.
    pub async fn list_by_group(
        pool: &PgPool,
        class_group_id: DbId,
    ) -> Result<Vec<ClassEnrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM class_enrollments e
             JOIN students s ON s.id = e.student_id
             WHERE e.class_group_id = $1
             ORDER BY s.name, e.id"
        );
        sqlx::query_as::<_, ClassEnrollment>(&query)
            .bind(class_group_id)
            .fetch_all(pool)
            .await
    }

    /// Student IDs enrolled in a group.
    pub async fn student_ids(pool: &PgPool, class_group_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT student_id FROM class_enrollments WHERE class_group_id = $1")
                .bind(class_group_id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Remove an enrollment scoped to its group. Returns `true` if removed.
    ///
    /// Attendance already recorded for the student is kept.
    pub async fn delete_scoped(
        pool: &PgPool,
        class_group_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM class_enrollments WHERE id = $1 AND class_group_id = $2")
                .bind(id)
                .bind(class_group_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
