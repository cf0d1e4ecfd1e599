pub use super::daily_attendance::Entity as DailyAttendance;
pub use super::department_schedule::Entity as DepartmentSchedule;
