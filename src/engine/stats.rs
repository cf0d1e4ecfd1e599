//! Aggregate statistics over an employee's attendance records.

use crate::engine::clock::round1;
use crate::engine::schedule::ScheduleBook;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::stats::{EmployeeStatsSummary, OvertimeDay};
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

/// Date window for stats aggregation, resolved to an inclusive cutoff.
///
/// A days-back window takes an explicit as-of date so aggregation stays a
/// pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsWindow {
    cutoff: Option<NaiveDate>,
}

impl StatsWindow {
    /// No filtering; every record counts.
    pub fn all() -> Self {
        Self { cutoff: None }
    }

    /// Records on or after `from`.
    pub fn from_date(from: NaiveDate) -> Self {
        Self { cutoff: Some(from) }
    }

    /// Records from the last `days` days, measured back from `as_of`.
    pub fn last_days(days: u32, as_of: NaiveDate) -> Self {
        Self {
            cutoff: Some(as_of - TimeDelta::days(i64::from(days))),
        }
    }

    /// Whether a record date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.cutoff.is_none_or(|cutoff| date >= cutoff)
    }
}

/// Aggregate one employee's records over a window.
///
/// Sundays are carved out as overtime: they do not count toward presence
/// or expected hours, and every hour worked on one is overtime. Remaining
/// overtime and shortfall are netted against each other before reporting.
/// Empty input (or a window matching nothing) yields the zeroed summary.
pub fn aggregate(
    records: &[AttendanceRecord],
    window: StatsWindow,
    book: &ScheduleBook,
) -> EmployeeStatsSummary {
    let windowed: Vec<&AttendanceRecord> =
        records.iter().filter(|r| window.contains(r.date)).collect();
    if windowed.is_empty() {
        return EmployeeStatsSummary::default();
    }

    let (sunday, present): (Vec<&AttendanceRecord>, Vec<&AttendanceRecord>) =
        windowed.iter().copied().partition(|r| is_sunday(r.date));

    let total_present = present.len();

    // Missing checkouts still count as presence, but an entry-only punch
    // has no meaningful duration.
    let total_working_hours: f64 = present
        .iter()
        .filter(|r| r.status != AttendanceStatus::MissingCheckout)
        .map(|r| r.total_hours)
        .sum();

    let average_daily_hours = if total_present > 0 {
        total_working_hours / total_present as f64
    } else {
        0.0
    };

    let late_entries = present
        .iter()
        .filter(|r| r.status == AttendanceStatus::LateEntry)
        .count();
    let early_exits = present
        .iter()
        .filter(|r| r.status == AttendanceStatus::EarlyExit)
        .count();

    let expected_hours: f64 = present
        .iter()
        .map(|r| book.resolve(&r.employee_name, &r.department).expected_hours)
        .sum();

    let sunday_overtime_hours: f64 = sunday.iter().map(|r| r.total_hours).sum();
    let sundays_worked = sunday.len();

    let raw_shortfall = (expected_hours - total_working_hours).max(0.0);
    let raw_overtime = (total_working_hours - expected_hours).max(0.0);

    // Overtime first cancels shortfall; only the remainder is reported.
    let mut overtime_hours = raw_overtime + sunday_overtime_hours;
    let mut shortfall_hours = raw_shortfall;
    if overtime_hours >= shortfall_hours {
        overtime_hours -= shortfall_hours;
        shortfall_hours = 0.0;
    } else {
        shortfall_hours -= overtime_hours;
        overtime_hours = 0.0;
    }
    let regular_overtime_hours = (overtime_hours - sunday_overtime_hours).max(0.0);

    let mut longest_overtime_day: Option<OvertimeDay> = None;
    for record in &windowed {
        let day_overtime = if is_sunday(record.date) {
            record.total_hours
        } else {
            record.total_hours - book.resolve(&record.employee_name, &record.department).expected_hours
        };
        if day_overtime > 0.0 && longest_overtime_day.is_none_or(|l| day_overtime > l.hours) {
            longest_overtime_day = Some(OvertimeDay {
                date: record.date,
                hours: day_overtime,
            });
        }
    }

    let perfect_attendance_days = windowed
        .iter()
        .filter(|r| r.status == AttendanceStatus::OnTime)
        .count();

    let most_frequent_status = most_frequent(&windowed);

    let first_attendance_date = windowed.iter().map(|r| r.date).min();
    let last_attendance_date = windowed.iter().map(|r| r.date).max();

    EmployeeStatsSummary {
        total_present,
        total_working_hours: round1(total_working_hours),
        average_daily_hours: round1(average_daily_hours),
        late_entries,
        early_exits,
        shortfall_hours: round1(shortfall_hours),
        overtime_hours: round1(overtime_hours),
        sunday_overtime_hours: round1(sunday_overtime_hours),
        regular_overtime_hours: round1(regular_overtime_hours),
        sundays_worked,
        longest_overtime_day: longest_overtime_day.map(|l| OvertimeDay {
            date: l.date,
            hours: round1(l.hours),
        }),
        perfect_attendance_days,
        most_frequent_status,
        first_attendance_date,
        last_attendance_date,
    }
}

fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Highest-count status; ties go to the status encountered first.
fn most_frequent(records: &[&AttendanceRecord]) -> Option<AttendanceStatus> {
    let mut counts: Vec<(AttendanceStatus, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(status, _)| *status == record.status) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.status, 1)),
        }
    }

    let mut best: Option<AttendanceStatus> = None;
    let mut best_count = 0;
    for (status, count) in counts {
        if count > best_count {
            best_count = count;
            best = Some(status);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    // 2025-05-11 is a Sunday; the 12th through 16th run Monday to Friday.
    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn record(date: NaiveDate, hours: f64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            employee_no: "3".to_string(),
            employee_name: "bilal ali".to_string(),
            date,
            department: Department::Packing,
            entry: None,
            exit: None,
            total_hours: hours,
            status,
        }
    }

    #[test]
    fn test_shortfall_week() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(12), 12.0, AttendanceStatus::OnTime),
            record(day(13), 12.0, AttendanceStatus::OnTime),
            record(day(14), 12.0, AttendanceStatus::OnTime),
            record(day(15), 12.0, AttendanceStatus::OnTime),
            record(day(16), 6.0, AttendanceStatus::LessHours),
        ];

        let stats = aggregate(&records, StatsWindow::all(), &book);
        assert_eq!(stats.total_present, 5);
        assert_eq!(stats.total_working_hours, 54.0);
        assert_eq!(stats.average_daily_hours, 10.8);
        assert_eq!(stats.shortfall_hours, 6.0);
        assert_eq!(stats.overtime_hours, 0.0);
        assert_eq!(stats.sundays_worked, 0);
        assert_eq!(stats.perfect_attendance_days, 4);
        assert_eq!(stats.first_attendance_date, Some(day(12)));
        assert_eq!(stats.last_attendance_date, Some(day(16)));
    }

    #[test]
    fn test_sunday_overtime_nets_against_shortfall() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(11), 4.0, AttendanceStatus::Overtime), // Sunday
            record(day(12), 12.0, AttendanceStatus::OnTime),
            record(day(13), 12.0, AttendanceStatus::OnTime),
            record(day(14), 12.0, AttendanceStatus::OnTime),
            record(day(15), 12.0, AttendanceStatus::OnTime),
            record(day(16), 6.0, AttendanceStatus::LessHours),
        ];

        let stats = aggregate(&records, StatsWindow::all(), &book);
        assert_eq!(stats.total_present, 5);
        assert_eq!(stats.sundays_worked, 1);
        assert_eq!(stats.sunday_overtime_hours, 4.0);
        // 4h of Sunday overtime cancels part of the 6h shortfall.
        assert_eq!(stats.shortfall_hours, 2.0);
        assert_eq!(stats.overtime_hours, 0.0);
        assert_eq!(stats.regular_overtime_hours, 0.0);
        // The Sunday is the biggest single-day overtime.
        assert_eq!(
            stats.longest_overtime_day,
            Some(OvertimeDay {
                date: day(11),
                hours: 4.0
            })
        );
    }

    #[test]
    fn test_overtime_surplus_after_netting() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(12), 14.0, AttendanceStatus::OnTime),
            record(day(13), 12.0, AttendanceStatus::OnTime),
        ];

        let stats = aggregate(&records, StatsWindow::all(), &book);
        assert_eq!(stats.shortfall_hours, 0.0);
        assert_eq!(stats.overtime_hours, 2.0);
        assert_eq!(stats.regular_overtime_hours, 2.0);
        assert_eq!(
            stats.longest_overtime_day,
            Some(OvertimeDay {
                date: day(12),
                hours: 2.0
            })
        );
    }

    #[test]
    fn test_missing_checkout_counts_present_but_not_hours() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(12), 12.0, AttendanceStatus::OnTime),
            record(day(13), 5.0, AttendanceStatus::MissingCheckout),
        ];

        let stats = aggregate(&records, StatsWindow::all(), &book);
        assert_eq!(stats.total_present, 2);
        assert_eq!(stats.total_working_hours, 12.0);
        assert_eq!(stats.average_daily_hours, 6.0);
    }

    #[test]
    fn test_most_frequent_status_tie_takes_first_encountered() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(12), 12.0, AttendanceStatus::OnTime),
            record(day(13), 12.0, AttendanceStatus::LateEntry),
            record(day(14), 12.0, AttendanceStatus::LateEntry),
            record(day(15), 12.0, AttendanceStatus::OnTime),
        ];

        let stats = aggregate(&records, StatsWindow::all(), &book);
        assert_eq!(stats.most_frequent_status, Some(AttendanceStatus::OnTime));
    }

    #[test]
    fn test_window_cutoff_is_inclusive() {
        let book = ScheduleBook::default();
        let records = vec![
            record(day(12), 12.0, AttendanceStatus::OnTime),
            record(day(14), 12.0, AttendanceStatus::OnTime),
        ];

        let stats = aggregate(&records, StatsWindow::from_date(day(14)), &book);
        assert_eq!(stats.total_present, 1);
        assert_eq!(stats.first_attendance_date, Some(day(14)));

        let stats = aggregate(&records, StatsWindow::last_days(7, day(16)), &book);
        assert_eq!(stats.total_present, 2);
    }

    #[test]
    fn test_empty_input_returns_zeroed_summary() {
        let book = ScheduleBook::default();
        assert_eq!(
            aggregate(&[], StatsWindow::all(), &book),
            EmployeeStatsSummary::default()
        );
        // A window matching nothing behaves the same.
        let records = vec![record(day(12), 12.0, AttendanceStatus::OnTime)];
        assert_eq!(
            aggregate(&records, StatsWindow::from_date(day(20)), &book),
            EmployeeStatsSummary::default()
        );
    }
}
