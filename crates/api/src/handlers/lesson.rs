//! Handlers for `/class-groups/{id}/lessons`, including recurring
//! generation from the group's weekly schedule and the lesson lifecycle.

use academy_core::error::CoreError;
use academy_core::lesson_status::{STATUS_CANCELLED, STATUS_COMPLETED};
use academy_core::schedule::{
    plan_lessons, resolve_generation_range, validate_schedule, validate_within_term,
};
use academy_core::types::DbId;
use academy_core::validation::{
    blank_to_none, parse_optional_date, parse_start_time, validate_notes,
    validate_positive_minutes,
};
use academy_db::models::class_lesson::{
    ClassLesson, CreateClassLesson, GeneratedLessons, UpdateClassLesson,
};
use academy_db::repositories::ClassLessonRepo;
use academy_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::class_group::load_group;
use crate::handlers::{check_transition, ensure_reschedulable, validate};
use crate::query::LessonListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a single lesson by hand.
#[derive(Debug, Deserialize)]
pub struct CreateLessonRequest {
    pub lesson_date: NaiveDate,
    pub start_time: String,
    /// Defaults to the group's `default_duration_minutes`.
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

/// Request body for `POST .../lessons/generate`. Omitted or blank bounds
/// default to the group's term.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateLessonsRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLessonRequest {
    pub lesson_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ClassLesson",
        id,
    })
}

/// Load a lesson belonging to `group_id` or fail with 404.
pub(crate) async fn load_lesson(pool: &DbPool, group_id: DbId, id: DbId) -> AppResult<ClassLesson> {
    ClassLessonRepo::find_scoped(pool, group_id, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/class-groups/{id}/lessons?from=&to=&status=
pub async fn list_by_group(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Query(params): Query<LessonListParams>,
) -> AppResult<Json<DataResponse<Vec<ClassLesson>>>> {
    load_group(&state.pool, group_id).await?;

    let filter = params.to_filter()?;
    let lessons = ClassLessonRepo::list_by_group(&state.pool, group_id, &filter).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// POST /api/v1/class-groups/{id}/lessons
///
/// A lesson already occupying the same date and start time is a 409.
pub async fn create(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Json(input): Json<CreateLessonRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ClassLesson>>)> {
    let group = load_group(&state.pool, group_id).await?;

    validate(validate_within_term(group.term(), input.lesson_date))?;
    let start_time = validate(parse_start_time(&input.start_time))?;
    let duration_minutes = input
        .duration_minutes
        .unwrap_or(group.default_duration_minutes);
    validate(validate_positive_minutes("duration_minutes", duration_minutes))?;
    validate(validate_notes(input.notes.as_deref()))?;

    let lesson = ClassLessonRepo::create(
        &state.pool,
        &CreateClassLesson {
            class_group_id: group_id,
            lesson_date: input.lesson_date,
            start_time,
            duration_minutes,
            notes: blank_to_none(input.notes),
        },
    )
    .await?;
    tracing::info!(class_group_id = group_id, lesson_id = lesson.id, "Lesson created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// POST /api/v1/class-groups/{id}/lessons/generate
///
/// Materializes the weekly schedule over `[from, to]`. Slots that already
/// have a lesson (in any status) are skipped, so repeating a generation is
/// harmless.
pub async fn generate(
    State(state): State<AppState>,
    Path(group_id): Path<DbId>,
    Json(input): Json<GenerateLessonsRequest>,
) -> AppResult<Json<DataResponse<GeneratedLessons>>> {
    let group = load_group(&state.pool, group_id).await?;

    let from = validate(parse_optional_date("from", input.from.as_deref()))?;
    let to = validate(parse_optional_date("to", input.to.as_deref()))?;
    let (from, to) = validate(resolve_generation_range(
        group.term(),
        from,
        to,
        state.config.max_generation_days,
    ))?;
    let slots = validate(validate_schedule(&group.weekly_schedule))?;

    let planned = plan_lessons(&slots, from, to);
    let created = ClassLessonRepo::insert_planned(
        &state.pool,
        group_id,
        group.default_duration_minutes,
        &planned,
    )
    .await?;

    let result = GeneratedLessons {
        created_count: created.len(),
        skipped_count: planned.len() - created.len(),
        created,
    };
    tracing::info!(
        class_group_id = group_id,
        %from,
        %to,
        created = result.created_count,
        skipped = result.skipped_count,
        "Lessons generated"
    );
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/class-groups/{id}/lessons/{lesson_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ClassLesson>>> {
    let lesson = load_lesson(&state.pool, group_id, id).await?;
    Ok(Json(DataResponse { data: lesson }))
}

/// PUT /api/v1/class-groups/{id}/lessons/{lesson_id}
pub async fn update(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateLessonRequest>,
) -> AppResult<Json<DataResponse<ClassLesson>>> {
    let group = load_group(&state.pool, group_id).await?;
    let lesson = load_lesson(&state.pool, group_id, id).await?;

    if let Some(date) = input.lesson_date {
        validate(validate_within_term(group.term(), date))?;
    }
    let start_time = input
        .start_time
        .as_deref()
        .map(|t| validate(parse_start_time(t)))
        .transpose()?;
    if let Some(minutes) = input.duration_minutes {
        validate(validate_positive_minutes("duration_minutes", minutes))?;
    }
    validate(validate_notes(input.notes.as_deref()))?;

    let changes = UpdateClassLesson {
        lesson_date: input.lesson_date,
        start_time,
        duration_minutes: input.duration_minutes,
        notes: input.notes,
    };
    if changes.reschedules() {
        ensure_reschedulable("lesson", lesson.status_id)?;
    }
    let lesson = ClassLessonRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| {
            if changes.reschedules() {
                lost_race(id)
            } else {
                not_found(id)
            }
        })?;
    tracing::info!(class_group_id = group_id, lesson_id = id, "Lesson updated");
    Ok(Json(DataResponse { data: lesson }))
}

/// POST /api/v1/class-groups/{id}/lessons/{lesson_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ClassLesson>>> {
    let lesson = load_lesson(&state.pool, group_id, id).await?;
    check_transition(lesson.status_id, STATUS_CANCELLED)?;

    let lesson = ClassLessonRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id))?;
    tracing::info!(class_group_id = group_id, lesson_id = id, "Lesson cancelled");
    Ok(Json(DataResponse { data: lesson }))
}

/// POST /api/v1/class-groups/{id}/lessons/{lesson_id}/complete
///
/// Enrolled students without attendance are marked present.
pub async fn complete(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ClassLesson>>> {
    let lesson = load_lesson(&state.pool, group_id, id).await?;
    check_transition(lesson.status_id, STATUS_COMPLETED)?;

    let lesson = ClassLessonRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(|| lost_race(id))?;
    tracing::info!(class_group_id = group_id, lesson_id = id, "Lesson completed");
    Ok(Json(DataResponse { data: lesson }))
}

/// DELETE /api/v1/class-groups/{id}/lessons/{lesson_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((group_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ClassLessonRepo::delete_scoped(&state.pool, group_id, id).await? {
        tracing::info!(class_group_id = group_id, lesson_id = id, "Lesson deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// The guarded update matched nothing: another request moved the lesson
/// out of `scheduled` after it was read.
fn lost_race(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Lesson {id} is no longer scheduled"
    )))
}
