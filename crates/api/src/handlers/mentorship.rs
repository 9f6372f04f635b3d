//! Handlers for the `/mentorships` resource.

use academy_core::billing::validate_amount;
use academy_core::error::CoreError;
use academy_core::types::DbId;
use academy_core::validation::{
    blank_to_none, parse_optional_date, validate_date_order, validate_mentorship_status,
    validate_notes,
};
use academy_db::models::mentorship::{
    CreateMentorship, Mentorship, MentorshipFilter, UpdateMentorship,
};
use academy_db::repositories::{MentorshipRepo, StudentRepo, SubjectRepo, TeacherRepo};
use academy_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_reference, nullable, validate};
use crate::query::{page, MentorshipListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /mentorships`. Dates are `YYYY-MM-DD`; blank
/// strings count as absent.
#[derive(Debug, Deserialize)]
pub struct CreateMentorshipRequest {
    pub student_id: DbId,
    pub teacher_id: DbId,
    pub subject_id: Option<DbId>,
    pub hourly_rate: Decimal,
    pub status: Option<String>,
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub notes: Option<String>,
}

/// Request body for `PUT /mentorships/{id}`. Omitted fields are unchanged;
/// `subject_id` and `ended_at` are cleared by an explicit `null` (or, for
/// `ended_at`, a blank string).
#[derive(Debug, Deserialize)]
pub struct UpdateMentorshipRequest {
    pub student_id: Option<DbId>,
    pub teacher_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub subject_id: Option<Option<DbId>>,
    pub hourly_rate: Option<Decimal>,
    pub status: Option<String>,
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ended_at: Option<Option<String>>,
    pub notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Mentorship",
        id,
    })
}

/// Load a mentorship or fail with 404. Shared by the nested session,
/// payment and billing handlers.
pub(crate) async fn load_mentorship(pool: &DbPool, id: DbId) -> AppResult<Mentorship> {
    MentorshipRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

async fn ensure_parties(
    pool: &DbPool,
    student_id: Option<DbId>,
    teacher_id: Option<DbId>,
    subject_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = student_id {
        ensure_reference(StudentRepo::exists(pool, id).await?, "student_id", id)?;
    }
    if let Some(id) = teacher_id {
        ensure_reference(TeacherRepo::exists(pool, id).await?, "teacher_id", id)?;
    }
    if let Some(id) = subject_id {
        ensure_reference(SubjectRepo::exists(pool, id).await?, "subject_id", id)?;
    }
    Ok(())
}

/// POST /api/v1/mentorships
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMentorshipRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Mentorship>>)> {
    validate(validate_amount("hourly_rate", input.hourly_rate))?;
    let status = blank_to_none(input.status);
    if let Some(status) = &status {
        validate(validate_mentorship_status(status))?;
    }
    let started_at = validate(parse_optional_date("started_at", input.started_at.as_deref()))?;
    let ended_at = validate(parse_optional_date("ended_at", input.ended_at.as_deref()))?;
    validate(validate_date_order("started_at", started_at, "ended_at", ended_at))?;
    validate(validate_notes(input.notes.as_deref()))?;
    ensure_parties(
        &state.pool,
        Some(input.student_id),
        Some(input.teacher_id),
        input.subject_id,
    )
    .await?;

    let mentorship = MentorshipRepo::create(
        &state.pool,
        &CreateMentorship {
            student_id: input.student_id,
            teacher_id: input.teacher_id,
            subject_id: input.subject_id,
            hourly_rate: input.hourly_rate,
            status,
            started_at,
            ended_at,
            notes: blank_to_none(input.notes),
        },
    )
    .await?;
    tracing::info!(
        mentorship_id = mentorship.id,
        student_id = mentorship.student_id,
        teacher_id = mentorship.teacher_id,
        "Mentorship created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: mentorship })))
}

/// GET /api/v1/mentorships?student_id=&teacher_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MentorshipListParams>,
) -> AppResult<Json<DataResponse<Vec<Mentorship>>>> {
    let (limit, offset) = page(params.limit, params.offset);
    let filter = MentorshipFilter {
        student_id: params.student_id,
        teacher_id: params.teacher_id,
    };
    let mentorships = MentorshipRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: mentorships }))
}

/// GET /api/v1/mentorships/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Mentorship>>> {
    let mentorship = load_mentorship(&state.pool, id).await?;
    Ok(Json(DataResponse { data: mentorship }))
}

/// PUT /api/v1/mentorships/{id}
///
/// Changing `hourly_rate` only affects payments recorded afterwards.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMentorshipRequest>,
) -> AppResult<Json<DataResponse<Mentorship>>> {
    let existing = load_mentorship(&state.pool, id).await?;

    if let Some(rate) = input.hourly_rate {
        validate(validate_amount("hourly_rate", rate))?;
    }
    let status = blank_to_none(input.status);
    if let Some(status) = &status {
        validate(validate_mentorship_status(status))?;
    }
    let started_at = validate(parse_optional_date("started_at", input.started_at.as_deref()))?;
    let ended_at = input
        .ended_at
        .as_ref()
        .map(|raw| validate(parse_optional_date("ended_at", raw.as_deref())))
        .transpose()?;
    validate(validate_date_order(
        "started_at",
        started_at.or(existing.started_at),
        "ended_at",
        ended_at.unwrap_or(existing.ended_at),
    ))?;
    validate(validate_notes(input.notes.as_deref()))?;
    ensure_parties(
        &state.pool,
        input.student_id,
        input.teacher_id,
        input.subject_id.flatten(),
    )
    .await?;

    let changes = UpdateMentorship {
        student_id: input.student_id,
        teacher_id: input.teacher_id,
        subject_id: input.subject_id,
        hourly_rate: input.hourly_rate,
        status,
        started_at,
        ended_at,
        notes: input.notes,
    };
    let mentorship = MentorshipRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(mentorship_id = id, "Mentorship updated");
    Ok(Json(DataResponse { data: mentorship }))
}

/// DELETE /api/v1/mentorships/{id}
///
/// Sessions, attendance, payments and debits go with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MentorshipRepo::delete(&state.pool, id).await? {
        tracing::info!(mentorship_id = id, "Mentorship deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
