//! Handlers for `/class-groups/{id}/enrollments`.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_db::models::class_enrollment::{ClassEnrollment, CreateClassEnrollment};
use academy_db::repositories::{ClassEnrollmentRepo, StudentRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::class_group::load_group;
use crate::handlers::ensure_reference;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/class-groups/{id}/enrollments
///
/// Enrolling the same student twice is a 409.
pub async fn create(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Json(input): Json<CreateClassEnrollment>,
) -> AppResult<(StatusCode, Json<DataResponse<ClassEnrollment>>)> {
    load_group(&state.pool, group_id).await?;
    ensure_reference(
        StudentRepo::exists(&state.pool, input.student_id).await?,
        "student_id",
        input.student_id,
    )?;

    let enrollment =
        ClassEnrollmentRepo::create(&state.pool, group_id, input.student_id, input.enrolled_at)
            .await?;
    tracing::info!(
        class_group_id = group_id,
        student_id = input.student_id,
        enrollment_id = enrollment.id,
        "Student enrolled"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: enrollment })))
}

/// GET /api/v1/class-groups/{id}/enrollments
pub async fn list_by_group(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClassEnrollment>>>> {
    load_group(&state.pool, group_id).await?;
    let enrollments = ClassEnrollmentRepo::list_by_group(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

/// DELETE /api/v1/class-groups/{id}/enrollments/{enrollment_id}
///
/// Attendance already recorded for the student is kept.
pub async fn delete(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ClassEnrollmentRepo::delete_scoped(&state.pool, group_id, id).await? {
        tracing::info!(class_group_id = group_id, enrollment_id = id, "Enrollment removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ClassEnrollment",
            id,
        }))
    }
}
