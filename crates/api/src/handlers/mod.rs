//! HTTP handlers, one module per resource.

pub mod billing;
pub mod class_group;
pub mod enrollment;
pub mod lesson;
pub mod lesson_attendance;
pub mod mentorship;
pub mod payment;
pub mod session;
pub mod session_attendance;
pub mod student;
pub mod subject;
pub mod teacher;

use academy_core::error::CoreError;
use academy_core::lesson_status::{is_terminal, status_name, validate_transition, STATUS_CANCELLED};
use academy_core::types::{DbId, StatusId};
use serde::{Deserialize, Deserializer};

use crate::error::AppResult;

/// `deserialize_with` for clearable fields: an absent field stays `None`
/// (pair with `#[serde(default)]`), an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reject a request that references a row which does not exist.
///
/// Referential mistakes are caller input errors (400), unlike a missing
/// path resource (404).
pub(crate) fn ensure_reference(exists: bool, field: &str, id: DbId) -> AppResult<()> {
    if exists {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} {id} does not exist")).into())
    }
}

/// Lift a core validation result into the handler error type.
pub(crate) fn validate<T>(result: Result<T, String>) -> AppResult<T> {
    result.map_err(|msg| CoreError::Validation(msg).into())
}

/// Check a lesson or session status transition; an invalid one is a 409.
pub(crate) fn check_transition(from: StatusId, to: StatusId) -> AppResult<()> {
    validate_transition(from, to).map_err(|msg| CoreError::Conflict(msg).into())
}

/// Date, start time and duration are frozen once an occurrence leaves
/// `scheduled`. Notes stay editable.
pub(crate) fn ensure_reschedulable(entity: &str, status_id: StatusId) -> AppResult<()> {
    if is_terminal(status_id) {
        return Err(CoreError::Conflict(format!(
            "Cannot reschedule a {} {entity}",
            status_name(status_id)
        ))
        .into());
    }
    Ok(())
}

/// Attendance cannot be recorded for a cancelled occurrence.
pub(crate) fn ensure_attendance_open(entity: &str, status_id: StatusId) -> AppResult<()> {
    if status_id == STATUS_CANCELLED {
        return Err(CoreError::Conflict(format!(
            "Cannot record attendance for a cancelled {entity}"
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use academy_core::lesson_status::{STATUS_COMPLETED, STATUS_SCHEDULED};
    use assert_matches::assert_matches;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        subject_id: Option<Option<i64>>,
    }

    #[test]
    fn nullable_tells_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.subject_id, None);
        let cleared: Patch = serde_json::from_str(r#"{"subject_id":null}"#).unwrap();
        assert_eq!(cleared.subject_id, Some(None));
        let set: Patch = serde_json::from_str(r#"{"subject_id":4}"#).unwrap();
        assert_eq!(set.subject_id, Some(Some(4)));
    }

    #[test]
    fn missing_reference_is_a_validation_error() {
        assert_matches!(
            ensure_reference(false, "teacher_id", 7),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "teacher_id 7 does not exist"
        );
        assert!(ensure_reference(true, "teacher_id", 7).is_ok());
    }

    #[test]
    fn leaving_a_terminal_status_is_a_conflict() {
        assert!(check_transition(STATUS_SCHEDULED, STATUS_COMPLETED).is_ok());
        assert_matches!(
            check_transition(STATUS_COMPLETED, STATUS_CANCELLED),
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[test]
    fn completed_occurrence_is_frozen() {
        assert!(ensure_reschedulable("lesson", STATUS_SCHEDULED).is_ok());
        assert_matches!(
            ensure_reschedulable("lesson", STATUS_COMPLETED),
            Err(AppError::Core(CoreError::Conflict(msg))) if msg.contains("completed lesson")
        );
    }

    #[test]
    fn cancelled_occurrence_takes_no_attendance() {
        assert!(ensure_attendance_open("session", STATUS_COMPLETED).is_ok());
        assert_matches!(
            ensure_attendance_open("session", STATUS_CANCELLED),
            Err(AppError::Core(CoreError::Conflict(_)))
        );
    }

    #[test]
    fn validate_lifts_messages() {
        assert_matches!(
            validate::<()>(Err("bad".into())),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "bad"
        );
    }
}
