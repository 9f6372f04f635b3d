//! Field-level validation helpers shared by every resource.
//!
//! Each function returns `Err` with a human-readable message naming the
//! offending field; handlers lift these into `CoreError::Validation`.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidateEmail;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of name-like fields (student, teacher, subject, group).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of a free-text mentorship status.
pub const MAX_MENTORSHIP_STATUS_LENGTH: usize = 32;

/// Maximum length of a start time string (`HH:MM` or `HH:MM:SS`).
pub const MAX_START_TIME_LENGTH: usize = 10;

/// Maximum length of free-text notes.
pub const MAX_NOTES_LENGTH: usize = 5_000;

/// Default mentorship status when none is supplied.
pub const DEFAULT_MENTORSHIP_STATUS: &str = "active";

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Validate a required string: non-blank and at most `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    validate_max_length(field, value, max)
}

/// Validate that a string is at most `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{field} must not exceed {max} characters"));
    }
    Ok(())
}

/// Validate a required name field (<= 255 characters).
pub fn validate_name(field: &str, value: &str) -> Result<(), String> {
    validate_required(field, value, MAX_NAME_LENGTH)
}

/// Validate optional notes.
pub fn validate_notes(notes: Option<&str>) -> Result<(), String> {
    match notes {
        Some(n) => validate_max_length("notes", n, MAX_NOTES_LENGTH),
        None => Ok(()),
    }
}

/// Validate an email address.
pub fn validate_email(field: &str, value: &str) -> Result<(), String> {
    validate_required(field, value, MAX_NAME_LENGTH)?;
    if !value.validate_email() {
        return Err(format!("{field} must be a valid email address"));
    }
    Ok(())
}

/// Validate a free-text mentorship status (<= 32 characters, not blank).
pub fn validate_mentorship_status(status: &str) -> Result<(), String> {
    validate_required("status", status, MAX_MENTORSHIP_STATUS_LENGTH)
}

/// Treat blank strings as absent.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Dates and times
// ---------------------------------------------------------------------------

/// Parse a start time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_start_time(value: &str) -> Result<NaiveTime, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("start_time is required".to_string());
    }
    validate_max_length("start_time", trimmed, MAX_START_TIME_LENGTH)?;
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| format!("start_time '{trimmed}' must be formatted as HH:MM or HH:MM:SS"))
}

/// Parse an optional date string, treating blank strings as `None`.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("{field} '{v}' must be a date formatted as YYYY-MM-DD")),
    }
}

/// Validate that `end` is not before `start` when both are present.
pub fn validate_date_order(
    start_field: &str,
    start: Option<NaiveDate>,
    end_field: &str,
    end: Option<NaiveDate>,
) -> Result<(), String> {
    if let (Some(s), Some(e)) = (start, end) {
        if e < s {
            return Err(format!(
                "{end_field} ({e}) must be on or after {start_field} ({s})"
            ));
        }
    }
    Ok(())
}

/// Validate a positive duration in minutes.
pub fn validate_positive_minutes(field: &str, minutes: i32) -> Result<(), String> {
    if minutes < 1 {
        return Err(format!("{field} must be at least 1 minute"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_required() {
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", "Ada").is_ok());
    }

    #[test]
    fn name_length_boundary() {
        let ok = "a".repeat(MAX_NAME_LENGTH);
        let too_long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name("name", &ok).is_ok());
        assert_eq!(
            validate_name("name", &too_long).unwrap_err(),
            "name must not exceed 255 characters"
        );
    }

    #[test]
    fn mentorship_status_limit() {
        assert!(validate_mentorship_status("active").is_ok());
        assert!(validate_mentorship_status(&"x".repeat(33)).is_err());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("email", "teacher@school.test").is_ok());
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "").is_err());
    }

    #[test]
    fn start_time_formats() {
        assert_eq!(
            parse_start_time("16:30").unwrap(),
            NaiveTime::from_hms_opt(16, 30, 0).unwrap()
        );
        assert_eq!(
            parse_start_time("08:05:10").unwrap(),
            NaiveTime::from_hms_opt(8, 5, 10).unwrap()
        );
        assert!(parse_start_time("25:00").is_err());
        assert!(parse_start_time("").is_err());
        assert!(parse_start_time("16:30:00.000").is_err());
    }

    #[test]
    fn blank_date_is_none() {
        assert_eq!(parse_optional_date("paid_at", Some("")), Ok(None));
        assert_eq!(parse_optional_date("paid_at", Some("  ")), Ok(None));
        assert_eq!(parse_optional_date("paid_at", None), Ok(None));
        assert_eq!(
            parse_optional_date("paid_at", Some("2026-03-01")),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 1))
        );
        assert!(parse_optional_date("paid_at", Some("01/03/2026")).is_err());
    }

    #[test]
    fn date_order() {
        let a = NaiveDate::from_ymd_opt(2026, 1, 1);
        let b = NaiveDate::from_ymd_opt(2026, 6, 1);
        assert!(validate_date_order("started_at", a, "ended_at", b).is_ok());
        assert!(validate_date_order("started_at", a, "ended_at", a).is_ok());
        assert!(validate_date_order("started_at", b, "ended_at", a).is_err());
        assert!(validate_date_order("started_at", None, "ended_at", a).is_ok());
    }

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(blank_to_none(Some(" ".into())), None);
        assert_eq!(blank_to_none(Some("x".into())), Some("x".into()));
    }
}
