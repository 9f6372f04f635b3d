//! Debit listing and balance aggregation over payments and debits.

use academy_core::types::DbId;
use sqlx::PgPool;

use crate::models::billing::{BillingTotals, MentorshipBalance, MentorshipDebit};

/// Column list for `mentorship_debits`, shared with the session
/// completion workflow that inserts debits.
pub(crate) const DEBIT_COLUMNS: &str =
    "id, mentorship_id, mentorship_session_id, hours, debited_at, created_at, updated_at";

/// Read-side billing queries. Debits are only written by
/// `MentorshipSessionRepo::complete`.
pub struct BillingRepo;

impl BillingRepo {
    /// List a mentorship's debits, newest first.
    pub async fn list_debits(
        pool: &PgPool,
        mentorship_id: DbId,
    ) -> Result<Vec<MentorshipDebit>, sqlx::Error> {
        let query = format!(
            "SELECT {DEBIT_COLUMNS} FROM mentorship_debits
             WHERE mentorship_id = $1
             ORDER BY debited_at DESC, id DESC"
        );
        sqlx::query_as::<_, MentorshipDebit>(&query)
            .bind(mentorship_id)
            .fetch_all(pool)
            .await
    }

    /// Compute the hour balance of a mentorship from its payments and
    /// debits. Nothing is cached; every call reads the current rows.
    pub async fn balance(pool: &PgPool, mentorship_id: DbId) -> Result<MentorshipBalance, sqlx::Error> {
        let totals = sqlx::query_as::<_, BillingTotals>(
            "SELECT
                COALESCE((SELECT SUM(hours) FROM mentorship_payments WHERE mentorship_id = $1), 0)
                    AS credited_hours,
                COALESCE((SELECT SUM(hours) FROM mentorship_debits WHERE mentorship_id = $1), 0)
                    AS debited_hours,
                COALESCE((SELECT SUM(amount) FROM mentorship_payments WHERE mentorship_id = $1), 0)
                    AS total_paid,
                (SELECT COUNT(*) FROM mentorship_payments WHERE mentorship_id = $1)
                    AS payment_count,
                (SELECT COUNT(*) FROM mentorship_debits WHERE mentorship_id = $1)
                    AS debit_count",
        )
        .bind(mentorship_id)
        .fetch_one(pool)
        .await?;

        Ok(MentorshipBalance::from_totals(mentorship_id, totals))
    }
}
