pub mod class_group;
pub mod health;
pub mod mentorship;
pub mod student;
pub mod subject;
pub mod teacher;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                                               list (?search, limit, offset), create
/// /students/{id}                                          get, update, delete
/// /subjects                                               list, create
/// /subjects/{id}                                          get, update, delete
/// /teachers                                               list, create
/// /teachers/{id}                                          get, update, delete
///
/// /class-groups                                           list, create
/// /class-groups/{id}                                      get, update, delete
/// /class-groups/{id}/enrollments                          list, enroll
/// /class-groups/{id}/enrollments/{enrollment_id}          unenroll
/// /class-groups/{id}/lessons                              list (?from, to, status), create
/// /class-groups/{id}/lessons/generate                     generate from schedule (POST)
/// /class-groups/{id}/lessons/{lesson_id}                  get, update, delete
/// /class-groups/{id}/lessons/{lesson_id}/cancel           cancel (POST)
/// /class-groups/{id}/lessons/{lesson_id}/complete         complete (POST)
/// /class-groups/{id}/lessons/{lesson_id}/attendance       roster, record batch (GET, PUT)
///
/// /mentorships                                            list (?student_id, teacher_id), create
/// /mentorships/{id}                                       get, update, delete
/// /mentorships/{id}/balance                               hour balance (GET)
/// /mentorships/{id}/debits                                debits (GET)
/// /mentorships/{id}/sessions                              list, create
/// /mentorships/{id}/sessions/{session_id}                 get, update, delete
/// /mentorships/{id}/sessions/{session_id}/cancel          cancel (POST)
/// /mentorships/{id}/sessions/{session_id}/complete        complete + debit (POST)
/// /mentorships/{id}/sessions/{session_id}/attendance      get, record (GET, PUT)
/// /mentorships/{id}/payments                              list, create
/// /mentorships/{id}/payments/{payment_id}                 get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", student::router())
        .nest("/subjects", subject::router())
        .nest("/teachers", teacher::router())
        // Class groups with nested enrollments, lessons and attendance.
        .nest("/class-groups", class_group::router())
        // Mentorships with nested sessions, payments and billing.
        .nest("/mentorships", mentorship::router())
}
