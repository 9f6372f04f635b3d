//! Handlers for `/mentorships/{id}/sessions/{session_id}/attendance`.

use academy_core::attendance::{attendance_status_id_from_name, normalize_absence_notified};
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::mentorship_attendance::{
    MentorshipAttendance, UpsertMentorshipAttendance,
};
use academy_db::repositories::MentorshipAttendanceRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::session::load_session;
use crate::handlers::{ensure_attendance_open, validate};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordSessionAttendanceRequest {
    /// `present`, `late` or `absent`.
    pub status: String,
    /// Kept only for `absent`.
    pub absence_notified: Option<bool>,
}

/// GET /api/v1/mentorships/{id}/sessions/{session_id}/attendance
pub async fn get(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<MentorshipAttendance>>> {
    load_session(&state.pool, mentorship_id, id).await?;
    let attendance = MentorshipAttendanceRepo::find_by_session(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MentorshipAttendance",
            id,
        }))?;
    Ok(Json(DataResponse { data: attendance }))
}

/// PUT /api/v1/mentorships/{id}/sessions/{session_id}/attendance
pub async fn record(
    State(state): State<AppState>,
    Path((mentorship_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<RecordSessionAttendanceRequest>,
) -> AppResult<Json<DataResponse<MentorshipAttendance>>> {
    let session = load_session(&state.pool, mentorship_id, id).await?;
    ensure_attendance_open("session", session.status_id)?;

    let status_id = validate(attendance_status_id_from_name(&input.status))?;
    let record = UpsertMentorshipAttendance {
        status_id,
        absence_notified: normalize_absence_notified(status_id, input.absence_notified),
    };
    let attendance = MentorshipAttendanceRepo::upsert(&state.pool, id, &record).await?;
    tracing::info!(
        mentorship_id,
        session_id = id,
        status_id,
        absence_notified = attendance.absence_notified,
        "Session attendance recorded"
    );
    Ok(Json(DataResponse { data: attendance }))
}
