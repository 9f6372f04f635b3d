//! Repository for the `teachers` table and their `users` accounts.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};
use crate::models::user::User;

/// Teacher columns joined with the owning user's email (`t` / `u` aliases).
const COLUMNS: &str = "t.id, t.user_id, t.name, u.email, t.created_at, t.updated_at";

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Provides CRUD operations for teachers.
pub struct TeacherRepo;

impl TeacherRepo {
    /// Create the user account and the teacher row in one transaction.
    ///
    /// A duplicate email fails on `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateTeacher) -> Result<Teacher, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let teacher_query = format!(
            "WITH t AS (
                INSERT INTO teachers (user_id, name) VALUES ($1, $2)
                RETURNING id, user_id, name, created_at, updated_at
             )
             SELECT t.id, t.user_id, t.name, $3::TEXT AS email, t.created_at, t.updated_at
             FROM t"
        );
        let teacher = sqlx::query_as::<_, Teacher>(&teacher_query)
            .bind(user.id)
            .bind(&input.name)
            .bind(&user.email)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(teacher)
    }

    /// Find a teacher by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teachers t JOIN users u ON u.id = t.user_id WHERE t.id = $1"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a teacher with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List teachers ordered by name.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Teacher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM teachers t JOIN users u ON u.id = t.user_id
             ORDER BY t.name, t.id
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Teacher>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a teacher's name and/or account email.
    ///
    /// The name is mirrored onto the user account. Returns `None` if no
    /// teacher with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeacher,
    ) -> Result<Option<Teacher>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<(DbId,)> = sqlx::query_as(
            "UPDATE teachers SET name = COALESCE($2, name) WHERE id = $1 RETURNING user_id",
        )
        .bind(id)
        .bind(&input.name)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((user_id,)) = user_id else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.email)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM teachers t JOIN users u ON u.id = t.user_id WHERE t.id = $1"
        );
        let teacher = sqlx::query_as::<_, Teacher>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(teacher))
    }

    /// Delete a teacher by removing its user account (the teacher row
    /// cascades). Returns `true` if a teacher was removed.
    ///
    /// Fails with a foreign key violation while class groups or mentorships
    /// reference the teacher.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM teachers WHERE id = $1)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
