//! Weekly schedules and recurring lesson planning.
//!
//! A class group carries a weekly schedule: a set of `{weekday, start_time}`
//! slots. Planning walks a date range inside the group's term and yields one
//! occurrence per matching `(date, slot)`. Persisting the plan is idempotent
//! on `(class_group_id, lesson_date, start_time)`, so the planner itself
//! never needs to know what already exists.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::validation::parse_start_time;

/// Default upper bound on the number of days a single generation may span.
pub const DEFAULT_MAX_GENERATION_DAYS: i64 = 366;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Day of the week as stored in a weekly schedule (`"monday"` ... `"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<ScheduleDay> for Weekday {
    fn from(day: ScheduleDay) -> Self {
        match day {
            ScheduleDay::Monday => Weekday::Mon,
            ScheduleDay::Tuesday => Weekday::Tue,
            ScheduleDay::Wednesday => Weekday::Wed,
            ScheduleDay::Thursday => Weekday::Thu,
            ScheduleDay::Friday => Weekday::Fri,
            ScheduleDay::Saturday => Weekday::Sat,
            ScheduleDay::Sunday => Weekday::Sun,
        }
    }
}

/// One recurring slot of a weekly schedule.
///
/// `start_time` is kept as the caller's string (`HH:MM` or `HH:MM:SS`) so the
/// stored JSON matches what was submitted; it is validated on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub weekday: ScheduleDay,
    pub start_time: String,
}

/// Inclusive term date range of a class group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TermBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A planned lesson occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlannedLesson {
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a weekly schedule and return its parsed slots.
///
/// Every start time must parse and no `(weekday, start_time)` pair may
/// appear twice. An empty schedule is valid.
pub fn validate_schedule(slots: &[WeeklySlot]) -> Result<Vec<(Weekday, NaiveTime)>, String> {
    let mut parsed: Vec<(Weekday, NaiveTime)> = Vec::with_capacity(slots.len());
    for slot in slots {
        let time = parse_start_time(&slot.start_time)
            .map_err(|e| format!("weekly_schedule: {e}"))?;
        let weekday = Weekday::from(slot.weekday);
        if parsed.contains(&(weekday, time)) {
            return Err(format!(
                "weekly_schedule contains a duplicate slot: {:?} at {}",
                slot.weekday, slot.start_time
            ));
        }
        parsed.push((weekday, time));
    }
    Ok(parsed)
}

/// Validate that a single date falls inside the term.
pub fn validate_within_term(term: TermBounds, date: NaiveDate) -> Result<(), String> {
    if term.contains(date) {
        Ok(())
    } else {
        Err(format!(
            "Date {date} is outside the term ({} to {})",
            term.start, term.end
        ))
    }
}

/// Resolve and validate a generation range.
///
/// Omitted bounds default to the term bounds. The range must be ordered, lie
/// inside the term and span at most `max_days` days.
pub fn resolve_generation_range(
    term: TermBounds,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    max_days: i64,
) -> Result<(NaiveDate, NaiveDate), String> {
    let from = from.unwrap_or(term.start);
    let to = to.unwrap_or(term.end);

    if from > to {
        return Err(format!("from ({from}) must be on or before to ({to})"));
    }
    if from < term.start || to > term.end {
        return Err(format!(
            "Range {from} to {to} is outside the term ({} to {})",
            term.start, term.end
        ));
    }
    let span = (to - from).num_days() + 1;
    if span > max_days {
        return Err(format!(
            "Range spans {span} days; at most {max_days} days can be generated at once"
        ));
    }
    Ok((from, to))
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Plan every occurrence of `slots` between `from` and `to` inclusive.
///
/// Output is ordered by date, then start time.
pub fn plan_lessons(
    slots: &[(Weekday, NaiveTime)],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PlannedLesson> {
    if slots.is_empty() || from > to {
        return Vec::new();
    }

    let mut planned: Vec<PlannedLesson> = from
        .iter_days()
        .take_while(|d| *d <= to)
        .flat_map(|date| {
            slots
                .iter()
                .filter(move |(weekday, _)| date.weekday() == *weekday)
                .map(move |(_, time)| PlannedLesson {
                    lesson_date: date,
                    start_time: *time,
                })
        })
        .collect();

    planned.sort();
    planned
}
