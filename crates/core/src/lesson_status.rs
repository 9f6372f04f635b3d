//! Lesson and mentorship session status constants and state machine.
//!
//! Class lessons and mentorship sessions share the `lesson_statuses` lookup
//! table. The IDs here mirror its seed data (1-based SMALLSERIAL) and the
//! `LessonStatus` enum in the `db` crate.

use crate::types::StatusId;

// ---------------------------------------------------------------------------
// Status IDs
// ---------------------------------------------------------------------------

pub const STATUS_SCHEDULED: StatusId = 1;
pub const STATUS_COMPLETED: StatusId = 2;
pub const STATUS_CANCELLED: StatusId = 3;

/// Name/ID pairs accepted on input.
const STATUS_NAMES: &[(&str, StatusId)] = &[
    ("scheduled", STATUS_SCHEDULED),
    ("completed", STATUS_COMPLETED),
    ("cancelled", STATUS_CANCELLED),
];

/// Resolve a status name (`scheduled`, `completed`, `cancelled`) to its ID.
pub fn status_id_from_name(name: &str) -> Result<StatusId, String> {
    STATUS_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| {
            format!(
                "Invalid status '{name}'. Must be one of: scheduled, completed, cancelled"
            )
        })
}

/// Human-readable name for a status ID (for error messages).
pub fn status_name(id: StatusId) -> &'static str {
    STATUS_NAMES
        .iter()
        .find(|(_, i)| *i == id)
        .map(|(n, _)| *n)
        .unwrap_or("unknown")
}

/// Whether no further transitions are allowed out of `status_id`.
pub fn is_terminal(status_id: StatusId) -> bool {
    valid_transitions(status_id).is_empty()
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of valid target status IDs reachable from `from_status`.
///
/// Completed and Cancelled are terminal and return an empty slice.
pub fn valid_transitions(from_status: StatusId) -> &'static [StatusId] {
    match from_status {
        STATUS_SCHEDULED => &[STATUS_COMPLETED, STATUS_CANCELLED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: StatusId, to: StatusId) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a state transition, returning an error message for invalid ones.
pub fn validate_transition(from: StatusId, to: StatusId) -> Result<(), String> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status transition: {} -> {}",
            status_name(from),
            status_name(to)
        ))
    }
}
