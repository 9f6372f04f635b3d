//! Handlers for `/mentorships/{id}/payments`.

use academy_core::billing::{hours_for_payment, validate_amount, validate_hours};
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::validation::{blank_to_none, parse_optional_date, validate_notes};
use academy_db::models::mentorship_payment::{CreateMentorshipPayment, MentorshipPayment};
use academy_db::repositories::MentorshipPaymentRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::mentorship::load_mentorship;
use crate::handlers::validate;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Decimal,
    /// Hours credited. Derived from the mentorship's hourly rate when omitted.
    pub hours: Option<Decimal>,
    /// `YYYY-MM-DD`; blank means unknown.
    pub paid_at: Option<String>,
    pub notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MentorshipPayment",
        id,
    })
}

/// POST /api/v1/mentorships/{id}/payments
pub async fn create(
    State(state): State<AppState>,
    Path(mentorship_id): Path<DbId>,
    Json(input): Json<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MentorshipPayment>>)> {
    let mentorship = load_mentorship(&state.pool, mentorship_id).await?;

    validate(validate_amount("amount", input.amount))?;
    let hours = match input.hours {
        Some(hours) => {
            validate(validate_hours(hours))?;
            hours
        }
        None => validate(hours_for_payment(input.amount, mentorship.hourly_rate))?,
    };
    let paid_at = validate(parse_optional_date("paid_at", input.paid_at.as_deref()))?;
    validate(validate_notes(input.notes.as_deref()))?;

    let payment = MentorshipPaymentRepo::create(
        &state.pool,
        &CreateMentorshipPayment {
            mentorship_id,
            amount: input.amount,
            hours,
            paid_at,
            notes: blank_to_none(input.notes),
        },
    )
    .await?;
    tracing::info!(
        mentorship_id,
        payment_id = payment.id,
        amount = %payment.amount,
        hours = %payment.hours,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}

/// GET /api/v1/mentorships/{id}/payments
pub async fn list_by_mentorship(
    State(state): State<AppState>,
    Path(mentorship_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MentorshipPayment>>>> {
    load_mentorship(&state.pool, mentorship_id).await?;
    let payments = MentorshipPaymentRepo::list_by_mentorship(&state.pool, mentorship_id).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// GET /api/v1/mentorships/{id}/payments/{payment_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<MentorshipPayment>>> {
    let payment = MentorshipPaymentRepo::find_scoped(&state.pool, mentorship_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: payment }))
}

/// DELETE /api/v1/mentorships/{id}/payments/{payment_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if MentorshipPaymentRepo::delete_scoped(&state.pool, mentorship_id, id).await? {
        tracing::info!(mentorship_id, payment_id = id, "Payment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
