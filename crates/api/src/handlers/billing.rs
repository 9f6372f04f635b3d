//! Read-only billing views of a mentorship: hour balance and debits.

use academy_core::types::DbId;
use academy_db::models::billing::{MentorshipBalance, MentorshipDebit};
use academy_db::repositories::BillingRepo;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::handlers::mentorship::load_mentorship;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/mentorships/{id}/balance
///
/// Credited minus debited hours, computed from the current rows. May be
/// negative.
pub async fn balance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MentorshipBalance>>> {
    load_mentorship(&state.pool, id).await?;
    let balance = BillingRepo::balance(&state.pool, id).await?;
    Ok(Json(DataResponse { data: balance }))
}

/// GET /api/v1/mentorships/{id}/debits
pub async fn list_debits(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MentorshipDebit>>>> {
    load_mentorship(&state.pool, id).await?;
    let debits = BillingRepo::list_debits(&state.pool, id).await?;
    Ok(Json(DataResponse { data: debits }))
}
