//! Repository for the `mentorship_payments` table.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::mentorship_payment::{CreateMentorshipPayment, MentorshipPayment};

const COLUMNS: &str = "id, mentorship_id, amount, hours, paid_at, notes, created_at, updated_at";

/// Provides operations for mentorship payments.
pub struct MentorshipPaymentRepo;

impl MentorshipPaymentRepo {
    /// Record a payment.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMentorshipPayment,
    ) -> Result<MentorshipPayment, sqlx::Error> {
        let query = format!(
            "INSERT INTO mentorship_payments (mentorship_id, amount, hours, paid_at, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MentorshipPayment>(&query)
            .bind(input.mentorship_id)
            .bind(input.amount)
            .bind(input.hours)
            .bind(input.paid_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by ID, scoped to its mentorship.
    pub async fn find_scoped(
        pool: &PgPool,
        mentorship_id: DbId,
        id: DbId,
    ) -> Result<Option<MentorshipPayment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorship_payments WHERE id = $1 AND mentorship_id = $2"
        );
        sqlx::query_as::<_, MentorshipPayment>(&query)
            .bind(id)
            .bind(mentorship_id)
            .fetch_optional(pool)
            .await
    }

    /// List a mentorship's payments; undated payments first, then newest.
    pub async fn list_by_mentorship(
        pool: &PgPool,
        mentorship_id: DbId,
    ) -> Result<Vec<MentorshipPayment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mentorship_payments
             WHERE mentorship_id = $1
             ORDER BY paid_at DESC NULLS FIRST, id DESC"
        );
        sqlx::query_as::<_, MentorshipPayment>(&query)
            .bind(mentorship_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a payment scoped to its mentorship. Returns `true` if removed.
    pub async fn delete_scoped(
        pool: &PgPool,
        mentorship_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM mentorship_payments WHERE id = $1 AND mentorship_id = $2")
                .bind(id)
                .bind(mentorship_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
