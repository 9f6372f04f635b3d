use academy_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error type returned by every handler.
///
/// Domain failures arrive as [`CoreError`], persistence failures as
/// [`sqlx::Error`]. Both are rendered as `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full, rendered sanitized.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }

    fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "An internal error occurred")
    }
}

/// Postgres error codes that surface as client errors, keyed by SQLSTATE
/// and the constraint name prefix used in the migrations.
const CONSTRAINT_RULES: &[(&str, &str, StatusCode, &str, &str)] = &[
    ("23505", "uq_", StatusCode::CONFLICT, "CONFLICT", "Duplicate value violates unique constraint"),
    ("23503", "fk_", StatusCode::CONFLICT, "CONFLICT", "Operation violates reference constraint"),
    ("23514", "ck_", StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Value violates check constraint"),
];

/// SQLSTATE for a value that does not fit its `NUMERIC` column.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
            ),
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", msg.as_str()),
            ),
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg.as_str()))
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("BAD_REQUEST", msg.as_str()),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Map a sqlx error onto a response.
///
/// `RowNotFound` is a 404. Violations of named `uq_*`, `fk_*` and `ck_*`
/// constraints follow [`CONSTRAINT_RULES`]; anything else is logged and
/// sanitized to a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("VALIDATION_ERROR", "Numeric value out of range"),
        ),
        sqlx::Error::Database(db_err) => {
            let sqlstate = db_err.code();
            let constraint = db_err.constraint().unwrap_or_default();
            let rule = CONSTRAINT_RULES.iter().find(|(code, prefix, ..)| {
                sqlstate.as_deref() == Some(*code) && constraint.starts_with(prefix)
            });
            match rule {
                Some((_, _, status, code, message)) => {
                    (*status, ErrorBody::new(*code, format!("{message}: {constraint}")))
                }
                None => {
                    tracing::error!(error = %db_err, "Unclassified database error");
                    (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
        }
    }
}
