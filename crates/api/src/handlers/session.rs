//! Handlers for `/mentorships/{id}/sessions` and the session
//! lifecycle. Completing a session debits its hours from the mentorship.

use academy_core::billing::validate_session_duration;
use academy_core::error::CoreError;
use academy_core::lesson_status::{
    status_id_from_name, STATUS_CANCELLED, STATUS_COMPLETED, STATUS_SCHEDULED,
};
use academy_core::types::DbId;
use academy_core::validation::{blank_to_none, parse_start_time, validate_notes};
use academy_db::models::mentorship_session::{
    CompletedSession, CreateMentorshipSession, MentorshipSession, UpdateMentorshipSession,
};
use academy_db::repositories::MentorshipSessionRepo;
use academy_db::DbPool;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::mentorship::load_mentorship;
use crate::handlers::{check_transition, ensure_reschedulable, validate};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub session_date: NaiveDate,
    pub start_time: String,
    /// Whole hours only: 60, 120, ...
    pub duration_minutes: i32,
    /// `scheduled` (default), `completed` or `cancelled`.
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MentorshipSession",
        id,
    })
}

fn lost_race(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Session {id} is no longer scheduled"
    )))
}

/// Load a session belonging to `mentorship_id` or fail with 404.
pub(crate) async fn load_session(
    pool: &DbPool,
    mentorship_id: DbId,
    id: DbId,
) -> AppResult<MentorshipSession> {
    MentorshipSessionRepo::find_scoped(pool, mentorship_id, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/mentorships/{id}/sessions
///
/// A session created as `completed` is debited immediately.
pub async fn create(
    State(state): State<AppState>,
    Path(mentorship_id): Path<DbId>,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MentorshipSession>>)> {
    load_mentorship(&state.pool, mentorship_id).await?;

    let start_time = validate(parse_start_time(&input.start_time))?;
    validate(validate_session_duration(input.duration_minutes))?;
    validate(validate_notes(input.notes.as_deref()))?;
    let status_id = match blank_to_none(input.status) {
        Some(name) => validate(status_id_from_name(&name))?,
        None => STATUS_SCHEDULED,
    };

    let new_session = CreateMentorshipSession {
        mentorship_id,
        session_date: input.session_date,
        start_time,
        duration_minutes: input.duration_minutes,
        status_id,
        notes: blank_to_none(input.notes),
    };

    let session = if status_id == STATUS_COMPLETED {
        let completed = MentorshipSessionRepo::create_completed(&state.pool, &new_session).await?;
        tracing::info!(
            mentorship_id,
            session_id = completed.session.id,
            debit_id = completed.debit.id,
            hours = %completed.debit.hours,
            "Session created as completed"
        );
        completed.session
    } else {
        let session = MentorshipSessionRepo::create(&state.pool, &new_session).await?;
        tracing::info!(mentorship_id, session_id = session.id, status_id, "Session created");
        session
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/mentorships/{id}/sessions
pub async fn list_by_mentorship(
    State(state): State<AppState>,
    Path(mentorship_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MentorshipSession>>>> {
    load_mentorship(&state.pool, mentorship_id).await?;
    let sessions = MentorshipSessionRepo::list_by_mentorship(&state.pool, mentorship_id).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/mentorships/{id}/sessions/{session_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<MentorshipSession>>> {
    let session = load_session(&state.pool, mentorship_id, id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/mentorships/{id}/sessions/{session_id}
pub async fn update(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSessionRequest>,
) -> AppResult<Json<DataResponse<MentorshipSession>>> {
    let session = load_session(&state.pool, mentorship_id, id).await?;

    let start_time = input
        .start_time
        .as_deref()
        .map(|t| validate(parse_start_time(t)))
        .transpose()?;
    if let Some(minutes) = input.duration_minutes {
        validate(validate_session_duration(minutes))?;
    }
    validate(validate_notes(input.notes.as_deref()))?;

    let changes = UpdateMentorshipSession {
        session_date: input.session_date,
        start_time,
        duration_minutes: input.duration_minutes,
        notes: input.notes,
    };
    if changes.reschedules() {
        ensure_reschedulable("session", session.status_id)?;
    }
    let session = MentorshipSessionRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| {
            if changes.reschedules() {
                lost_race(id)
            } else {
                not_found(id)
            }
        })?;
    tracing::info!(mentorship_id, session_id = id, "Session updated");
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/mentorships/{id}/sessions/{session_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<MentorshipSession>>> {
    let session = load_session(&state.pool, mentorship_id, id).await?;
    check_transition(session.status_id, STATUS_CANCELLED)?;

    let session = MentorshipSessionRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id))?;
    tracing::info!(mentorship_id, session_id = id, "Session cancelled");
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/mentorships/{id}/sessions/{session_id}/complete
///
/// Marks the session completed, debits `duration_minutes / 60` hours and
/// records default `present` attendance, all in one transaction. A second
/// completion is a 409 and never produces a second debit.
pub async fn complete(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<CompletedSession>>> {
    let session = load_session(&state.pool, mentorship_id, id).await?;
    check_transition(session.status_id, STATUS_COMPLETED)?;

    let completed = MentorshipSessionRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id))?;
    tracing::info!(
        mentorship_id,
        session_id = id,
        debit_id = completed.debit.id,
        hours = %completed.debit.hours,
        "Session completed"
    );
    Ok(Json(DataResponse { data: completed }))
}

/// DELETE /api/v1/mentorships/{id}/sessions/{session_id}
///
/// The session's debit goes with it, returning its hours to the balance.
pub async fn delete(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if MentorshipSessionRepo::delete_scoped(&state.pool, mentorship_id, id).await? {
        tracing::info!(mentorship_id, session_id = id, "Session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
