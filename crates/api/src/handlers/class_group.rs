//! Handlers for the `/class-groups` resource.

use academy_core::billing::validate_amount;
use academy_core::error::CoreError;
use academy_core::schedule::validate_schedule;
use academy_core::types::DbId;
use academy_core::validation::{validate_date_order, validate_name, validate_positive_minutes};
use academy_db::models::class_group::{ClassGroup, CreateClassGroup, UpdateClassGroup};
use academy_db::repositories::{ClassGroupRepo, SubjectRepo, TeacherRepo};
use academy_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_reference, validate};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ClassGroup",
        id,
    })
}

/// Load a class group or fail with 404. Shared by the nested
/// enrollment and lesson handlers.
pub(crate) async fn load_group(pool: &DbPool, id: DbId) -> AppResult<ClassGroup> {
    ClassGroupRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

async fn ensure_subject_and_teacher(
    pool: &DbPool,
    subject_id: Option<DbId>,
    teacher_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(subject_id) = subject_id {
        ensure_reference(SubjectRepo::exists(pool, subject_id).await?, "subject_id", subject_id)?;
    }
    if let Some(teacher_id) = teacher_id {
        ensure_reference(TeacherRepo::exists(pool, teacher_id).await?, "teacher_id", teacher_id)?;
    }
    Ok(())
}

/// POST /api/v1/class-groups
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateClassGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<ClassGroup>>)> {
    validate(validate_name("name", &input.name))?;
    validate(validate_date_order(
        "term_start",
        Some(input.term_start),
        "term_end",
        Some(input.term_end),
    ))?;
    validate(validate_positive_minutes(
        "default_duration_minutes",
        input.default_duration_minutes,
    ))?;
    validate(validate_amount("hourly_rate", input.hourly_rate))?;
    validate(validate_schedule(&input.weekly_schedule))?;
    ensure_subject_and_teacher(&state.pool, Some(input.subject_id), Some(input.teacher_id)).await?;

    let group = ClassGroupRepo::create(&state.pool, &input).await?;
    tracing::info!(
        class_group_id = group.id,
        slots = group.weekly_schedule.len(),
        "Class group created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/v1/class-groups
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ClassGroup>>>> {
    let (limit, offset) = params.resolve();
    let groups = ClassGroupRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/class-groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClassGroup>>> {
    let group = load_group(&state.pool, id).await?;
    Ok(Json(DataResponse { data: group }))
}

/// PUT /api/v1/class-groups/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClassGroup>,
) -> AppResult<Json<DataResponse<ClassGroup>>> {
    let existing = load_group(&state.pool, id).await?;

    if let Some(name) = &input.name {
        validate(validate_name("name", name))?;
    }
    // The term is checked as it will be after the update.
    validate(validate_date_order(
        "term_start",
        Some(input.term_start.unwrap_or(existing.term_start)),
        "term_end",
        Some(input.term_end.unwrap_or(existing.term_end)),
    ))?;
    if let Some(minutes) = input.default_duration_minutes {
        validate(validate_positive_minutes("default_duration_minutes", minutes))?;
    }
    if let Some(rate) = input.hourly_rate {
        validate(validate_amount("hourly_rate", rate))?;
    }
    if let Some(slots) = &input.weekly_schedule {
        validate(validate_schedule(slots))?;
    }
    ensure_subject_and_teacher(&state.pool, input.subject_id, input.teacher_id).await?;

    let group = ClassGroupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(class_group_id = id, "Class group updated");
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/class-groups/{id}
///
/// Enrollments, lessons and their attendance are removed with the group.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ClassGroupRepo::delete(&state.pool, id).await? {
        tracing::info!(class_group_id = id, "Class group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
