//! Hour debits and the derived mentorship balance.

use academy_core::billing::HourBalance;
use academy_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mentorship_debits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorshipDebit {
    pub id: DbId,
    pub mentorship_id: DbId,
    pub mentorship_session_id: DbId,
    pub hours: Decimal,
    pub debited_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Aggregates read from payments and debits of one mentorship.
#[derive(Debug, Clone, FromRow)]
pub struct BillingTotals {
    pub credited_hours: Decimal,
    pub debited_hours: Decimal,
    pub total_paid: Decimal,
    pub payment_count: i64,
    pub debit_count: i64,
}

/// Balance report for a mentorship.
#[derive(Debug, Clone, Serialize)]
pub struct MentorshipBalance {
    pub mentorship_id: DbId,
    #[serde(flatten)]
    pub hours: HourBalance,
    pub total_paid: Decimal,
    pub payment_count: i64,
    pub debit_count: i64,
}

impl MentorshipBalance {
    pub fn from_totals(mentorship_id: DbId, totals: BillingTotals) -> Self {
        Self {
            mentorship_id,
            hours: HourBalance::new(totals.credited_hours, totals.debited_hours),
            total_paid: totals.total_paid,
            payment_count: totals.payment_count,
            debit_count: totals.debit_count,
        }
    }
}
