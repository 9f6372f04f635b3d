//! Typed handles for the rows seeded into `lesson_statuses` and
//! `attendance_statuses`.

pub use academy_core::types::StatusId;

/// Lifecycle shared by class lessons and mentorship sessions.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    Scheduled = 1,
    Completed = 2,
    Cancelled = 3,
}

/// How a student showed up (or did not).
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present = 1,
    Late = 2,
    Absent = 3,
}

impl LessonStatus {
    pub const ALL: [Self; 3] = [Self::Scheduled, Self::Completed, Self::Cancelled];

    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// The `name` column of the seeded row.
    pub fn name(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl AttendanceStatus {
    pub const ALL: [Self; 3] = [Self::Present, Self::Late, Self::Absent];

    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
            Self::Absent => "absent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::{attendance, lesson_status};

    #[test]
    fn lesson_ids_agree_with_state_machine() {
        let expected = [
            lesson_status::STATUS_SCHEDULED,
            lesson_status::STATUS_COMPLETED,
            lesson_status::STATUS_CANCELLED,
        ];
        let ids: Vec<StatusId> = LessonStatus::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn lesson_names_round_trip_through_core() {
        for status in LessonStatus::ALL {
            assert_eq!(lesson_status::status_name(status.id()), status.name());
        }
    }

    #[test]
    fn attendance_ids_agree_with_core() {
        assert_eq!(AttendanceStatus::Present.id(), attendance::ATTENDANCE_PRESENT);
        assert_eq!(AttendanceStatus::Late.id(), attendance::ATTENDANCE_LATE);
        assert_eq!(AttendanceStatus::Absent.id(), attendance::ATTENDANCE_ABSENT);
        for status in AttendanceStatus::ALL {
            assert_eq!(attendance::attendance_status_name(status.id()), status.name());
        }
    }
}
