//! Repository for the `attendances` table (class lessons).

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::attendance::{Attendance, RosterEntry, UpsertAttendance};

const COLUMNS: &str =
    "id, class_lesson_id, student_id, status_id, absence_notified, created_at, updated_at";

/// Provides attendance recording for class lessons.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// The lesson's roster: every student enrolled in `class_group_id`
    /// alongside their attendance for `class_lesson_id`, if recorded.
    pub async fn roster(
        pool: &PgPool,
        class_group_id: DbId,
        class_lesson_id: DbId,
    ) -> Result<Vec<RosterEntry>, sqlx::Error> {
        sqlx::query_as::<_, RosterEntry>(
            "SELECT s.id AS student_id, s.name AS student_name,
                    a.id AS attendance_id, a.status_id, a.absence_notified
             FROM class_enrollments e
             JOIN students s ON s.id = e.student_id
             LEFT JOIN attendances a
                ON a.student_id = e.student_id AND a.class_lesson_id = $2
             WHERE e.class_group_id = $1
             ORDER BY s.name, s.id",
        )
        .bind(class_group_id)
        .bind(class_lesson_id)
        .fetch_all(pool)
        .await
    }

    /// Insert or overwrite attendance for a batch of students in one
    /// transaction. Records are expected to be normalized already.
    pub async fn upsert_batch(
        pool: &PgPool,
        class_lesson_id: DbId,
        records: &[UpsertAttendance],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO attendances (class_lesson_id, student_id, status_id, absence_notified)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_attendances_lesson_student DO UPDATE SET
                status_id = EXCLUDED.status_id,
                absence_notified = EXCLUDED.absence_notified
             RETURNING {COLUMNS}"
        );

        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            let row = sqlx::query_as::<_, Attendance>(&query)
                .bind(class_lesson_id)
                .bind(record.student_id)
                .bind(record.status_id)
                .bind(record.absence_notified)
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }
}
