//! Attendance status derivation for reconciled daily records.

use crate::engine::clock::{self, ClockTime, MINUTES_PER_DAY};
use crate::engine::schedule::ScheduleRule;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use chrono::{Datelike, NaiveDate, Weekday};

/// Tolerance before lateness or earliness is flagged.
pub const GRACE_MINUTES: u16 = 15;

/// Assign exactly one status to a reconciled (entry, exit) pair.
///
/// Sunday attendance is overtime unconditionally. For midnight-crossing
/// schedules, comparisons run in shift-relative minutes so lateness is
/// only flagged inside the active shift window and an exit after midnight
/// is measured against the expected exit on the far side.
pub fn classify(
    date: NaiveDate,
    entry: Option<ClockTime>,
    exit: Option<ClockTime>,
    rule: &ScheduleRule,
) -> AttendanceStatus {
    if date.weekday() == Weekday::Sun {
        return AttendanceStatus::Overtime;
    }

    let Some(entry) = entry else {
        return AttendanceStatus::MissingCheckout;
    };
    let Some(exit) = exit else {
        return AttendanceStatus::MissingCheckout;
    };

    let actual_entry = entry.minutes();
    let actual_exit = exit.minutes();
    let expected_entry = rule.entry.minutes();
    let expected_exit = rule.exit.minutes();

    if rule.crosses_midnight() {
        // Minutes since the expected entry, wrapping at midnight.
        let rel = |t: u16| (t + MINUTES_PER_DAY - expected_entry) % MINUTES_PER_DAY;
        let shift_len = rel(expected_exit);

        let entry_rel = rel(actual_entry);
        if entry_rel > GRACE_MINUTES && entry_rel < shift_len {
            return AttendanceStatus::LateEntry;
        }
        if rel(actual_exit) + GRACE_MINUTES < shift_len {
            return AttendanceStatus::EarlyExit;
        }
    } else {
        if actual_entry > expected_entry + GRACE_MINUTES {
            return AttendanceStatus::LateEntry;
        }
        // An exit past midnight lands on the following day, not early.
        let effective_exit = if actual_exit < actual_entry {
            actual_exit + MINUTES_PER_DAY
        } else {
            actual_exit
        };
        if effective_exit + GRACE_MINUTES < expected_exit {
            return AttendanceStatus::EarlyExit;
        }
    }

    let expected_work = rule.expected_minutes();
    let actual_work = clock::elapsed_minutes(entry, exit);
    if actual_work + 2 * GRACE_MINUTES < expected_work {
        return AttendanceStatus::LessHours;
    }

    AttendanceStatus::OnTime
}

/// Re-derive `total_hours` and `status` after an entry/exit edit.
///
/// Pure transform; the input record is left untouched.
pub fn recompute(record: &AttendanceRecord, rule: &ScheduleRule) -> AttendanceRecord {
    let total_hours = match (record.entry, record.exit) {
        (Some(entry), Some(exit)) => clock::elapsed_hours(entry, exit),
        _ => 0.0,
    };
    AttendanceRecord {
        total_hours,
        status: classify(record.date, record.entry, record.exit, rule),
        ..record.clone()
    }
}
