//! Route definitions for the `/class-groups` resource.
//!
//! Also nests enrollments, lessons and lesson attendance under
//! `/class-groups/{id}/...`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{class_group, enrollment, lesson, lesson_attendance};
use crate::state::AppState;

/// Routes mounted at `/class-groups`. Nested routes share the parent's
/// `{id}` segment so the matcher sees one parameter name per position.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
///
/// GET    /{id}/enrollments                        -> list_by_group
/// POST   /{id}/enrollments                        -> create
/// DELETE /{id}/enrollments/{enrollment_id}        -> delete
///
/// GET    /{id}/lessons                            -> list_by_group
/// POST   /{id}/lessons                            -> create
/// POST   /{id}/lessons/generate                   -> generate
/// GET    /{id}/lessons/{lesson_id}                -> get_by_id
/// PUT    /{id}/lessons/{lesson_id}                -> update
/// DELETE /{id}/lessons/{lesson_id}                -> delete
/// POST   /{id}/lessons/{lesson_id}/cancel         -> cancel
/// POST   /{id}/lessons/{lesson_id}/complete       -> complete
/// GET    /{id}/lessons/{lesson_id}/attendance     -> roster
/// PUT    /{id}/lessons/{lesson_id}/attendance     -> record
/// ```
pub fn router() -> Router<AppState> {
    let enrollment_routes = Router::new()
        .route("/", get(enrollment::list_by_group).post(enrollment::create))
        .route("/{enrollment_id}", delete(enrollment::delete));

    let lesson_routes = Router::new()
        .route("/", get(lesson::list_by_group).post(lesson::create))
        .route("/generate", post(lesson::generate))
        .route(
            "/{lesson_id}",
            get(lesson::get_by_id)
                .put(lesson::update)
                .delete(lesson::delete),
        )
        .route("/{lesson_id}/cancel", post(lesson::cancel))
        .route("/{lesson_id}/complete", post(lesson::complete))
        .route(
            "/{lesson_id}/attendance",
            get(lesson_attendance::roster).put(lesson_attendance::record),
        );

    Router::new()
        .route("/", get(class_group::list).post(class_group::create))
        .route(
            "/{id}",
            get(class_group::get_by_id)
                .put(class_group::update)
                .delete(class_group::delete),
        )
        .nest("/{id}/enrollments", enrollment_routes)
        .nest("/{id}/lessons", lesson_routes)
}
