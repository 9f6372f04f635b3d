//! Shared query parameter types for API handlers.

use academy_core::lesson_status::status_id_from_name;
use academy_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use academy_core::validation::{blank_to_none, parse_optional_date};
use academy_db::models::class_lesson::ClassLessonFilter;
use serde::Deserialize;

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` pair ready to bind.
    pub fn resolve(&self) -> (i64, i64) {
        page(self.limit, self.offset)
    }
}

/// Clamp raw `limit` / `offset` query values.
pub fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(offset),
    )
}

/// `?search=&limit=&offset=` for the student directory.
#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?from=&to=&status=` for a group's lessons. Dates are `YYYY-MM-DD`,
/// status is a lesson status name; blank values are ignored.
#[derive(Debug, Deserialize)]
pub struct LessonListParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
}

impl LessonListParams {
    /// Parse the raw filters. A malformed value is a 400 `BAD_REQUEST`.
    pub fn to_filter(&self) -> Result<ClassLessonFilter, AppError> {
        let from = parse_optional_date("from", self.from.as_deref()).map_err(AppError::BadRequest)?;
        let to = parse_optional_date("to", self.to.as_deref()).map_err(AppError::BadRequest)?;
        let status_id = blank_to_none(self.status.clone())
            .map(|name| status_id_from_name(&name).map_err(AppError::BadRequest))
            .transpose()?;
        Ok(ClassLessonFilter {
            from,
            to,
            status_id,
        })
    }
}

/// `?student_id=&teacher_id=&limit=&offset=` for mentorships.
#[derive(Debug, Deserialize)]
pub struct MentorshipListParams {
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pagination_is_clamped() {
        let params = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(params.resolve(), (MAX_LIMIT, 0));
        assert_eq!(PaginationParams::default().resolve(), (DEFAULT_LIMIT, 0));
    }

    fn lesson_params(from: &str, to: &str, status: &str) -> LessonListParams {
        LessonListParams {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn blank_lesson_filters_are_ignored() {
        let filter = lesson_params("", " ", "").to_filter().unwrap();
        assert!(filter.from.is_none() && filter.to.is_none() && filter.status_id.is_none());
    }

    #[test]
    fn lesson_filters_parse() {
        let filter = lesson_params("2026-09-01", "2026-09-30", "completed")
            .to_filter()
            .unwrap();
        assert_eq!(filter.from.unwrap().to_string(), "2026-09-01");
        assert_eq!(filter.status_id, Some(2));
    }

    #[test]
    fn malformed_lesson_filters_are_bad_requests() {
        assert_matches!(
            lesson_params("09/01/2026", "", "").to_filter(),
            Err(AppError::BadRequest(msg)) if msg.contains("from")
        );
        assert_matches!(
            lesson_params("", "", "postponed").to_filter(),
            Err(AppError::BadRequest(_))
        );
    }
}
