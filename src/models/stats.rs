//! Aggregate statistics over an employee's attendance records.

use crate::models::attendance::AttendanceStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single day with the most overtime inside a stats window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertimeDay {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Aggregate over a filtered set of attendance records for one employee.
///
/// Recomputed on demand from the record set plus a window; never persisted.
/// All hour fields are rounded to 1 decimal place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeStatsSummary {
    /// Non-Sunday days with a record, missing checkouts included.
    pub total_present: usize,
    pub total_working_hours: f64,
    pub average_daily_hours: f64,
    pub late_entries: usize,
    pub early_exits: usize,
    /// Net deficit against expected hours after overtime netting.
    pub shortfall_hours: f64,
    /// Net excess over expected hours after shortfall netting.
    pub overtime_hours: f64,
    /// Hours worked on Sundays; overtime by definition.
    pub sunday_overtime_hours: f64,
    /// Post-netting overtime attributable to non-Sunday excess.
    pub regular_overtime_hours: f64,
    pub sundays_worked: usize,
    pub longest_overtime_day: Option<OvertimeDay>,
    pub perfect_attendance_days: usize,
    pub most_frequent_status: Option<AttendanceStatus>,
    pub first_attendance_date: Option<NaiveDate>,
    pub last_attendance_date: Option<NaiveDate>,
}
