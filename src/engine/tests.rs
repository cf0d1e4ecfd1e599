//! End-to-end tests across the engine: punches in, statistics out.

use super::clock::ClockTime;
use super::reconcile::reconcile_batch;
use super::schedule::{ProductionAssignment, Rosters, ScheduleBook, ShiftWindow};
use super::stats::{StatsWindow, aggregate};
use crate::models::attendance::AttendanceStatus;
use crate::models::department::{Department, ProductionCategory};
use crate::models::punch::RawPunch;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

fn rosters() -> Rosters {
    Rosters {
        administration: vec!["mian abdullah".to_string(), "javed shakoor".to_string()],
        supervisor: vec!["shafqat".to_string()],
        packing: vec!["iqra bibi".to_string(), "bilal ali".to_string()],
        production: vec![ProductionAssignment {
            name: "irfanneedle".to_string(),
            sub_department: Some("needle".to_string()),
            category: Some(ProductionCategory::Master),
        }],
        alternate_schedule: vec!["iqra bibi".to_string()],
    }
}

fn punch(no: &str, name: &str, day: u32, time: &str) -> RawPunch {
    RawPunch {
        employee_no: no.to_string(),
        employee_name: name.to_string(),
        timestamp: NaiveDateTime::parse_from_str(
            &format!("2025-05-{day:02} {time}"),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap(),
        exception: None,
        operation: None,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

#[test]
fn test_batch_to_stats_flow() {
    let book = ScheduleBook::new(rosters(), HashMap::new());

    // Monday 2025-05-12: three employees punch through the day.
    let punches = vec![
        punch("7", "mian abdullah", 12, "09:02:10"),
        punch("3", "bilal ali", 12, "07:58:03"),
        punch("7", "mian abdullah", 12, "13:10:00"),
        punch("7", "mian abdullah", 12, "18:05:40"),
        punch("3", "bilal ali", 12, "20:01:00"),
        punch("9", "iqra bibi", 12, "08:20:00"),
    ];

    let records = reconcile_batch(&punches, date(12), &book);
    assert_eq!(records.len(), 3);

    let admin = &records[0];
    assert_eq!(admin.department, Department::Administration);
    assert_eq!(admin.status, AttendanceStatus::OnTime);
    assert_eq!(admin.total_hours, 9.05);

    let packer = &records[1];
    assert_eq!(packer.department, Department::Packing);
    assert_eq!(packer.status, AttendanceStatus::OnTime);

    // Only one punch for iqra bibi: entry-only record.
    let single = &records[2];
    assert_eq!(single.exit, None);
    assert_eq!(single.status, AttendanceStatus::MissingCheckout);
}

#[test]
fn test_sunday_flows_through_to_overtime_stats() {
    let book = ScheduleBook::new(rosters(), HashMap::new());

    let mut records = Vec::new();
    // Sunday 2025-05-11, 4 hours worked.
    records.extend(reconcile_batch(
        &[
            punch("3", "bilal ali", 11, "08:00:00"),
            punch("3", "bilal ali", 11, "12:00:00"),
        ],
        date(11),
        &book,
    ));
    // Monday, a full 12-hour day.
    records.extend(reconcile_batch(
        &[
            punch("3", "bilal ali", 12, "08:00:00"),
            punch("3", "bilal ali", 12, "20:00:00"),
        ],
        date(12),
        &book,
    ));

    assert_eq!(records[0].status, AttendanceStatus::Overtime);
    assert_eq!(records[0].total_hours, 4.0);

    let stats = aggregate(&records, StatsWindow::all(), &book);
    assert_eq!(stats.total_present, 1);
    assert_eq!(stats.sundays_worked, 1);
    assert_eq!(stats.sunday_overtime_hours, 4.0);
    // No shortfall to net against: all 4 Sunday hours survive as overtime.
    assert_eq!(stats.overtime_hours, 4.0);
    assert_eq!(stats.regular_overtime_hours, 0.0);
    assert_eq!(stats.shortfall_hours, 0.0);
    assert_eq!(stats.most_frequent_status, Some(AttendanceStatus::Overtime));
}

#[test]
fn test_night_shift_department_override_flow() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "others".to_string(),
        ShiftWindow {
            entry: ClockTime::from_hm(18, 0),
            exit: ClockTime::from_hm(6, 0),
        },
    );
    let book = ScheduleBook::new(rosters(), overrides);

    // Guard on the night window, punching out after midnight is recorded
    // against the same calendar date's sheet.
    let records = reconcile_batch(
        &[
            punch("21", "night guard", 12, "17:55:00"),
            punch("21", "night guard", 12, "06:01:00"),
        ],
        date(12),
        &book,
    );

    // Chronological sort puts 06:01 first, so the pair crosses midnight.
    let record = &records[0];
    assert_eq!(record.department, Department::Others);
    assert_eq!(record.entry.unwrap().minutes(), 6 * 60 + 1);
    assert_eq!(record.exit.unwrap().minutes(), 17 * 60 + 55);
}

#[test]
fn test_classifier_consults_employee_rules_before_override() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "packing".to_string(),
        ShiftWindow {
            entry: ClockTime::from_hm(7, 0),
            exit: ClockTime::from_hm(19, 0),
        },
    );
    let book = ScheduleBook::new(rosters(), overrides);

    // iqra bibi sits on the alternate roster: 08:00-18:00 applies, not
    // the packing override.
    let records = reconcile_batch(
        &[
            punch("9", "iqra bibi", 12, "08:05:00"),
            punch("9", "iqra bibi", 12, "18:02:00"),
        ],
        date(12),
        &book,
    );
    assert_eq!(records[0].status, AttendanceStatus::OnTime);

    // bilal ali is plain packing: the 07:00 override makes 08:05 late.
    let records = reconcile_batch(
        &[
            punch("3", "bilal ali", 12, "08:05:00"),
            punch("3", "bilal ali", 12, "19:00:00"),
        ],
        date(12),
        &book,
    );
    assert_eq!(records[0].status, AttendanceStatus::LateEntry);
}
