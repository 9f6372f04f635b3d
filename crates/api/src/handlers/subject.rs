//! Handlers for the `/subjects` resource.

use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::validation::{validate_name, validate_notes};
use academy_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use academy_db::repositories::SubjectRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::validate;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subject",
        id,
    })
}

/// POST /api/v1/subjects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<DataResponse<Subject>>)> {
    validate(validate_name("name", &input.name))?;
    validate(validate_notes(input.description.as_deref()))?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(subject_id = subject.id, "Subject created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// GET /api/v1/subjects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Subject>>>> {
    let (limit, offset) = params.resolve();
    let subjects = SubjectRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// GET /api/v1/subjects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subject>>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: subject }))
}

/// PUT /api/v1/subjects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<DataResponse<Subject>>> {
    if let Some(name) = &input.name {
        validate(validate_name("name", name))?;
    }
    validate(validate_notes(input.description.as_deref()))?;

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(subject_id = id, "Subject updated");
    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /api/v1/subjects/{id}
///
/// Refused with 409 while class groups still teach the subject.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if SubjectRepo::delete(&state.pool, id).await? {
        tracing::info!(subject_id = id, "Subject deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
