//! Attendance status constants and the absence-notification rule.
//!
//! Attendance is a fixed classification, not a workflow: staff may correct
//! it freely. The only invariant is that `absence_notified` can be true
//! solely for absent students.

use crate::types::StatusId;

pub const ATTENDANCE_PRESENT: StatusId = 1;
pub const ATTENDANCE_LATE: StatusId = 2;
pub const ATTENDANCE_ABSENT: StatusId = 3;

const ATTENDANCE_NAMES: &[(&str, StatusId)] = &[
    ("present", ATTENDANCE_PRESENT),
    ("late", ATTENDANCE_LATE),
    ("absent", ATTENDANCE_ABSENT),
];

/// Resolve an attendance status name to its lookup-table ID.
pub fn attendance_status_id_from_name(name: &str) -> Result<StatusId, String> {
    ATTENDANCE_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| {
            format!("Invalid attendance status '{name}'. Must be one of: present, late, absent")
        })
}

/// Name for an attendance status ID.
pub fn attendance_status_name(id: StatusId) -> &'static str {
    ATTENDANCE_NAMES
        .iter()
        .find(|(_, i)| *i == id)
        .map(|(n, _)| *n)
        .unwrap_or("unknown")
}

/// Apply the absence-notification rule to caller input.
///
/// The flag is kept only when the status is absent; it is discarded (false)
/// for every other status. An omitted flag is false.
pub fn normalize_absence_notified(status_id: StatusId, absence_notified: Option<bool>) -> bool {
    status_id == ATTENDANCE_ABSENT && absence_notified.unwrap_or(false)
}
