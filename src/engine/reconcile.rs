//! Punch reconciliation: a day's unordered punches into entry/exit pairs.

use crate::engine::classify;
use crate::engine::clock::{self, ClockTime};
use crate::engine::schedule::ScheduleBook;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::punch::RawPunch;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Reconcile one employee's punches for one calendar date.
///
/// Punches are sorted chronologically; the first becomes the entry and the
/// last the exit. A single punch, or entry and exit landing on the same
/// minute, yields a record with no exit and a forced `missingCheckout`
/// status. No punches yield no record: absence is not a record.
///
/// Unparsable punches never reach this function; the import layer drops
/// them with a warning.
pub fn reconcile_day(
    punches: &[RawPunch],
    date: NaiveDate,
    book: &ScheduleBook,
) -> Option<AttendanceRecord> {
    if punches.is_empty() {
        return None;
    }

    let mut ordered: Vec<&RawPunch> = punches.iter().collect();
    ordered.sort_by_key(|p| p.timestamp);

    let first = ordered[0];
    let last = ordered[ordered.len() - 1];

    let entry = clock_of(&first.timestamp);
    let exit = clock_of(&last.timestamp);

    let employee_name = first.employee_name.clone();
    let department = book.department_for(&employee_name);

    if ordered.len() == 1 || entry == exit {
        return Some(AttendanceRecord {
            employee_no: first.employee_no.clone(),
            employee_name,
            date,
            department,
            entry: Some(entry),
            exit: None,
            total_hours: 0.0,
            status: AttendanceStatus::MissingCheckout,
        });
    }

    let rule = book.resolve(&employee_name, &department);
    let status = classify::classify(date, Some(entry), Some(exit), &rule);

    Some(AttendanceRecord {
        employee_no: first.employee_no.clone(),
        employee_name,
        date,
        department,
        entry: Some(entry),
        exit: Some(exit),
        total_hours: clock::elapsed_hours(entry, exit),
        status,
    })
}

/// Reconcile a whole import batch, grouping punches per employee.
///
/// Grouping matches names case-insensitively; records come out in the
/// order each employee first appears in the batch.
pub fn reconcile_batch(
    punches: &[RawPunch],
    date: NaiveDate,
    book: &ScheduleBook,
) -> Vec<AttendanceRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawPunch>> = HashMap::new();

    for punch in punches {
        let key = group_key(punch);
        match groups.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().push(punch.clone()),
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(vec![punch.clone()]);
            }
        }
    }

    order
        .iter()
        .filter_map(|key| reconcile_day(&groups[key], date, book))
        .collect()
}

fn group_key(punch: &RawPunch) -> String {
    format!(
        "{}-{}",
        punch.employee_no.trim(),
        punch.employee_name.trim().to_lowercase()
    )
}

fn clock_of(timestamp: &NaiveDateTime) -> ClockTime {
    ClockTime::from_hm(timestamp.hour() as u16, timestamp.minute() as u16)
}
