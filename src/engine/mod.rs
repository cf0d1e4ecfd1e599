//! Attendance derivation engine.
//!
//! Pure, synchronous functions only: reconcile raw punches into daily
//! entry/exit pairs, classify each day against the resolved schedule, and
//! aggregate per-employee statistics. No I/O happens here; the `db`,
//! `import`, and `export` modules own the edges.

pub mod classify;
pub mod clock;
pub mod reconcile;
pub mod schedule;
pub mod stats;

#[cfg(test)]
mod tests;

pub use classify::{GRACE_MINUTES, classify, recompute};
pub use clock::{ClockTime, elapsed_hours, elapsed_minutes};
pub use reconcile::{reconcile_batch, reconcile_day};
pub use schedule::{ProductionAssignment, Rosters, ScheduleBook, ScheduleRule, ShiftWindow};
pub use stats::{StatsWindow, aggregate};
