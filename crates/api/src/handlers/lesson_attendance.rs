//! Handlers for `/class-groups/{id}/lessons/{lesson_id}/attendance`.

use std::collections::HashSet;

use academy_core::attendance::{attendance_status_id_from_name, normalize_absence_notified};
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::attendance::{Attendance, RosterEntry, UpsertAttendance};
use academy_db::repositories::{AttendanceRepo, ClassEnrollmentRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::lesson::load_lesson;
use crate::handlers::{ensure_attendance_open, validate};
use crate::response::DataResponse;
use crate::state::AppState;

/// One student's attendance in a batch.
#[derive(Debug, Deserialize)]
pub struct AttendanceInput {
    pub student_id: DbId,
    /// `present`, `late` or `absent`.
    pub status: String,
    pub absence_notified: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    pub records: Vec<AttendanceInput>,
}

/// GET /api/v1/class-groups/{id}/lessons/{lesson_id}/attendance
///
/// Every enrolled student, with their attendance or nulls when none is
/// recorded yet.
pub async fn roster(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<RosterEntry>>>> {
    load_lesson(&state.pool, group_id, id).await?;
    let roster = AttendanceRepo::roster(&state.pool, group_id, id).await?;
    Ok(Json(DataResponse { data: roster }))
}

/// PUT /api/v1/class-groups/{id}/lessons/{lesson_id}/attendance
///
/// Upserts the whole batch in one transaction. Every student must be
/// enrolled in the group; nothing is written otherwise.
pub async fn record(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<RecordAttendanceRequest>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    let lesson = load_lesson(&state.pool, group_id, id).await?;
    ensure_attendance_open("lesson", lesson.status_id)?;

    if input.records.is_empty() {
        return Err(CoreError::Validation("records must not be empty".into()).into());
    }

    let enrolled: HashSet<DbId> = ClassEnrollmentRepo::student_ids(&state.pool, group_id)
        .await?
        .into_iter()
        .collect();
    let mut seen = HashSet::with_capacity(input.records.len());
    let mut records = Vec::with_capacity(input.records.len());

    for record in &input.records {
        if !enrolled.contains(&record.student_id) {
            return Err(CoreError::Validation(format!(
                "Student {} is not enrolled in class group {group_id}",
                record.student_id
            ))
            .into());
        }
        if !seen.insert(record.student_id) {
            return Err(CoreError::Validation(format!(
                "Student {} appears more than once",
                record.student_id
            ))
            .into());
        }
        let status_id = validate(attendance_status_id_from_name(&record.status))?;
        records.push(UpsertAttendance {
            student_id: record.student_id,
            status_id,
            absence_notified: normalize_absence_notified(status_id, record.absence_notified),
        });
    }

    let saved = AttendanceRepo::upsert_batch(&state.pool, id, &records).await?;
    tracing::info!(lesson_id = id, count = saved.len(), "Lesson attendance recorded");
    Ok(Json(DataResponse { data: saved }))
}
