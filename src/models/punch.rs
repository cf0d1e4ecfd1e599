//! Raw punch events as delivered by an import batch.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single clock event for an employee.
///
/// Punches arrive unordered and possibly duplicated; they are consumed
/// immediately by the reconciler and never persisted in raw form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPunch {
    pub employee_no: String,
    pub employee_name: String,
    pub timestamp: NaiveDateTime,
    /// Free-text hint from the device software, e.g. "OverTime In".
    pub exception: Option<String>,
    /// Operation code column, when the export carries one.
    pub operation: Option<String>,
}
