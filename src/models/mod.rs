//! Data models for punches, departments, and attendance records.

pub mod attendance;
pub mod department;
pub mod punch;
pub mod stats;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use department::{Department, ProductionCategory};
pub use punch::RawPunch;
pub use stats::{EmployeeStatsSummary, OvertimeDay};
