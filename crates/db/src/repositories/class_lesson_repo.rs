//! Repository for the `class_lessons` table.

use academy_core::schedule::PlannedLesson;
use academy_core::types::DbId;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use crate::models::class_lesson::{
    ClassLesson, ClassLessonFilter, CreateClassLesson, UpdateClassLesson,
};
use crate::models::status::{AttendanceStatus, LessonStatus};

const COLUMNS: &str = "id, class_group_id, lesson_date, start_time, duration_minutes, \
                       status_id, notes, created_at, updated_at";

/// Provides CRUD and lifecycle operations for class lessons.
pub struct ClassLessonRepo;

impl ClassLessonRepo {
    /// Insert a single scheduled lesson.
    ///
    /// A lesson at the same `(group, date, start_time)` fails on
    /// `uq_class_lessons_slot`.
    pub async fn create(pool: &PgPool, input: &CreateClassLesson) -> Result<ClassLesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO class_lessons
                (class_group_id, lesson_date, start_time, duration_minutes, status_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassLesson>(&query)
            .bind(input.class_group_id)
            .bind(input.lesson_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(LessonStatus::Scheduled.id())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Insert planned lessons, skipping any `(group, date, start_time)` that
    /// already exists. Returns only the rows actually created.
    pub async fn insert_planned(
        pool: &PgPool,
        class_group_id: DbId,
        duration_minutes: i32,
        planned: &[PlannedLesson],
    ) -> Result<Vec<ClassLesson>, sqlx::Error> {
        if planned.is_empty() {
            return Ok(Vec::new());
        }
        let dates: Vec<NaiveDate> = planned.iter().map(|p| p.lesson_date).collect();
        let times: Vec<NaiveTime> = planned.iter().map(|p| p.start_time).collect();

        let query = format!(
            "INSERT INTO class_lessons
                (class_group_id, lesson_date, start_time, duration_minutes, status_id)
             SELECT $1, p.lesson_date, p.start_time, $4, $5
             FROM UNNEST($2::DATE[], $3::TIME[]) AS p(lesson_date, start_time)
             ON CONFLICT ON CONSTRAINT uq_class_lessons_slot DO NOTHING
             RETURNING {COLUMNS}"
        );
        let mut created = sqlx::query_as::<_, ClassLesson>(&query)
            .bind(class_group_id)
            .bind(&dates)
            .bind(&times)
            .bind(duration_minutes)
            .bind(LessonStatus::Scheduled.id())
            .fetch_all(pool)
            .await?;
        created.sort_by_key(|l| (l.lesson_date, l.start_time));
        Ok(created)
    }

    /// Find a lesson by ID, scoped to its class group.
    pub async fn find_scoped(
        pool: &PgPool,
        class_group_id: DbId,
        id: DbId,
    ) -> Result<Option<ClassLesson>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM class_lessons WHERE id = $1 AND class_group_id = $2");
        sqlx::query_as::<_, ClassLesson>(&query)
            .bind(id)
            .bind(class_group_id)
            .fetch_optional(pool)
            .await
    }

    /// List a group's lessons in chronological order.
    pub async fn list_by_group(
        pool: &PgPool,
        class_group_id: DbId,
        filter: &ClassLessonFilter,
    ) -> Result<Vec<ClassLesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM class_lessons
             WHERE class_group_id = $1
               AND ($2::DATE IS NULL OR lesson_date >= $2)
               AND ($3::DATE IS NULL OR lesson_date <= $3)
               AND ($4::SMALLINT IS NULL OR status_id = $4)
             ORDER BY lesson_date, start_time, id"
        );
        sqlx::query_as::<_, ClassLesson>(&query)
            .bind(class_group_id)
            .bind(filter.from)
            .bind(filter.to)
            .bind(filter.status_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lesson's date, time, duration or notes.
    ///
    /// Date, time and duration change only while the lesson is scheduled;
    /// `None` covers a missing row and a reschedule that lost to a status
    /// change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClassLesson,
    ) -> Result<Option<ClassLesson>, sqlx::Error> {
        let query = format!(
            "UPDATE class_lessons SET
                lesson_date = COALESCE($2, lesson_date),
                start_time = COALESCE($3, start_time),
                duration_minutes = COALESCE($4, duration_minutes),
                notes = COALESCE($5, notes)
             WHERE id = $1 AND (NOT $6 OR status_id = $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassLesson>(&query)
            .bind(id)
            .bind(input.lesson_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(&input.notes)
            .bind(input.reschedules())
            .bind(LessonStatus::Scheduled.id())
            .fetch_optional(pool)
            .await
    }

    /// Cancel a scheduled lesson.
    ///
    /// Returns `None` when the lesson is not currently scheduled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<ClassLesson>, sqlx::Error> {
        let query = format!(
            "UPDATE class_lessons SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassLesson>(&query)
            .bind(id)
            .bind(LessonStatus::Cancelled.id())
            .bind(LessonStatus::Scheduled.id())
            .fetch_optional(pool)
            .await
    }

    /// Complete a scheduled lesson and seed a `present` attendance record for
    /// every enrolled student that has none yet, in one transaction.
    ///
    /// Returns `None` when the lesson is not currently scheduled.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<ClassLesson>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE class_lessons SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        let lesson = sqlx::query_as::<_, ClassLesson>(&query)
            .bind(id)
            .bind(LessonStatus::Completed.id())
            .bind(LessonStatus::Scheduled.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(lesson) = lesson else {
            return Ok(None);
        };

        let seeded = sqlx::query(
            "INSERT INTO attendances (class_lesson_id, student_id, status_id, absence_notified)
             SELECT $1, e.student_id, $3, false
             FROM class_enrollments e
             WHERE e.class_group_id = $2
             ON CONFLICT ON CONSTRAINT uq_attendances_lesson_student DO NOTHING",
        )
        .bind(lesson.id)
        .bind(lesson.class_group_id)
        .bind(AttendanceStatus::Present.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            lesson_id = lesson.id,
            seeded = seeded.rows_affected(),
            "Seeded attendance for completed lesson"
        );
        Ok(Some(lesson))
    }

    /// Delete a lesson scoped to its group. Returns `true` if removed.
    pub async fn delete_scoped(
        pool: &PgPool,
        class_group_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM class_lessons WHERE id = $1 AND class_group_id = $2")
            .bind(id)
            .bind(class_group_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
