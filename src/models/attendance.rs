//! Attendance records and status values.

use crate::engine::clock::ClockTime;
use crate::models::department::Department;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance outcome for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    OnTime,
    LateEntry,
    EarlyExit,
    MissingCheckout,
    LessHours,
    Overtime,
}

impl AttendanceStatus {
    /// Stable storage key, e.g. `lateEntry`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OnTime => "onTime",
            Self::LateEntry => "lateEntry",
            Self::EarlyExit => "earlyExit",
            Self::MissingCheckout => "missingCheckout",
            Self::LessHours => "lessHours",
            Self::Overtime => "overtime",
        }
    }

    /// Parse a storage key back into a status.
    pub fn parse_key(key: &str) -> Option<Self> {
        match key {
            "onTime" => Some(Self::OnTime),
            "lateEntry" => Some(Self::LateEntry),
            "earlyExit" => Some(Self::EarlyExit),
            "missingCheckout" => Some(Self::MissingCheckout),
            "lessHours" => Some(Self::LessHours),
            "overtime" => Some(Self::Overtime),
            _ => None,
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::LateEntry => "Late Entry",
            Self::EarlyExit => "Early Exit",
            Self::MissingCheckout => "Missing Checkout",
            Self::LessHours => "Less Hours",
            Self::Overtime => "Overtime",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One employee's reconciled attendance for one calendar date.
///
/// `total_hours` and `status` are always derived from the other fields;
/// after editing entry or exit, callers re-derive through
/// [`crate::engine::classify::recompute`] rather than patching them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_no: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub department: Department,
    pub entry: Option<ClockTime>,
    pub exit: Option<ClockTime>,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}
