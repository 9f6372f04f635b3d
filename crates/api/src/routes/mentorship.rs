//! Route definitions for the `/mentorships` resource.
//!
//! Also nests sessions, session attendance and payments under
//! `/mentorships/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{billing, mentorship, payment, session, session_attendance};
use crate::state::AppState;

/// Routes mounted at `/mentorships`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /{id}                                      -> get_by_id
/// PUT    /{id}                                      -> update
/// DELETE /{id}                                      -> delete
/// GET    /{id}/balance                              -> billing::balance
/// GET    /{id}/debits                               -> billing::list_debits
///
/// GET    /{id}/sessions                             -> list_by_mentorship
/// POST   /{id}/sessions                             -> create
/// GET    /{id}/sessions/{session_id}                -> get_by_id
/// PUT    /{id}/sessions/{session_id}                -> update
/// DELETE /{id}/sessions/{session_id}                -> delete
/// POST   /{id}/sessions/{session_id}/cancel         -> cancel
/// POST   /{id}/sessions/{session_id}/complete       -> complete
/// GET    /{id}/sessions/{session_id}/attendance     -> session_attendance::get
/// PUT    /{id}/sessions/{session_id}/attendance     -> session_attendance::record
///
/// GET    /{id}/payments                             -> list_by_mentorship
/// POST   /{id}/payments                             -> create
/// GET    /{id}/payments/{payment_id}                -> get_by_id
/// DELETE /{id}/payments/{payment_id}                -> delete
/// ```
pub fn router() -> Router<AppState> {
    let session_routes = Router::new()
        .route("/", get(session::list_by_mentorship).post(session::create))
        .route(
            "/{session_id}",
            get(session::get_by_id)
                .put(session::update)
                .delete(session::delete),
        )
        .route("/{session_id}/cancel", post(session::cancel))
        .route("/{session_id}/complete", post(session::complete))
        .route(
            "/{session_id}/attendance",
            get(session_attendance::get).put(session_attendance::record),
        );

    let payment_routes = Router::new()
        .route("/", get(payment::list_by_mentorship).post(payment::create))
        .route("/{payment_id}", get(payment::get_by_id).delete(payment::delete));

    Router::new()
        .route("/", get(mentorship::list).post(mentorship::create))
        .route(
            "/{id}",
            get(mentorship::get_by_id)
                .put(mentorship::update)
                .delete(mentorship::delete),
        )
        .route("/{id}/balance", get(billing::balance))
        .route("/{id}/debits", get(billing::list_debits))
        .nest("/{id}/sessions", session_routes)
        .nest("/{id}/payments", payment_routes)
}
