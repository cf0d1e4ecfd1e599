//! SeaORM entity definitions.

pub mod daily_attendance;
pub mod department_schedule;
pub mod prelude;
