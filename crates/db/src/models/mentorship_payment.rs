//! Mentorship payment model: money received, crediting hours.

use academy_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mentorship_payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MentorshipPayment {
    pub id: DbId,
    pub mentorship_id: DbId,
    pub amount: Decimal,
    pub hours: Decimal,
    /// `None` means the payment is recorded but not yet dated as paid.
    pub paid_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated values for inserting a payment.
#[derive(Debug, Clone)]
pub struct CreateMentorshipPayment {
    pub mentorship_id: DbId,
    pub amount: Decimal,
    pub hours: Decimal,
    pub paid_at: Option<NaiveDate>,
    pub notes: Option<String>,
}
