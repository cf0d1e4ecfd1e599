//! Expected-schedule resolution for employees and departments.

use crate::engine::clock::{self, ClockTime};
use crate::models::department::{Department, ProductionCategory};
use std::collections::HashMap;

/// Expected entry/exit window for one department, as persisted in the
/// department-settings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub entry: ClockTime,
    pub exit: ClockTime,
}

/// Expected entry time, exit time, and daily work hours for one employee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleRule {
    pub entry: ClockTime,
    pub exit: ClockTime,
    pub expected_hours: f64,
}

impl ScheduleRule {
    /// Fixed administrative policy: 09:00-18:00, 9 hours.
    pub fn administration() -> Self {
        Self {
            entry: ClockTime::from_hm(9, 0),
            exit: ClockTime::from_hm(18, 0),
            expected_hours: 9.0,
        }
    }

    /// Shorter-shift cohort: 08:00-18:00, 10 hours.
    pub fn alternate() -> Self {
        Self {
            entry: ClockTime::from_hm(8, 0),
            exit: ClockTime::from_hm(18, 0),
            expected_hours: 10.0,
        }
    }

    /// Standard long shift: 08:00-20:00, 12 hours.
    pub fn standard() -> Self {
        Self {
            entry: ClockTime::from_hm(8, 0),
            exit: ClockTime::from_hm(20, 0),
            expected_hours: 12.0,
        }
    }

    /// Derive a rule from a persisted department window; expected hours
    /// follow the window length, wrapping at midnight when exit < entry.
    pub fn from_window(window: ShiftWindow) -> Self {
        Self {
            entry: window.entry,
            exit: window.exit,
            expected_hours: clock::elapsed_hours(window.entry, window.exit),
        }
    }

    /// Whether the scheduled shift runs past midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.exit < self.entry
    }

    /// Scheduled shift length in minutes, midnight-aware.
    pub fn expected_minutes(&self) -> u16 {
        clock::elapsed_minutes(self.entry, self.exit)
    }
}

/// A production employee's roster entry.
#[derive(Debug, Clone)]
pub struct ProductionAssignment {
    pub name: String,
    pub sub_department: Option<String>,
    pub category: Option<ProductionCategory>,
}

/// Employee rosters injected at construction time.
///
/// Names are matched case-insensitively by containment, so a sheet name
/// like "Mian Abdullah (HR)" still resolves through the "mian abdullah"
/// roster entry.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    pub administration: Vec<String>,
    pub supervisor: Vec<String>,
    pub packing: Vec<String>,
    pub production: Vec<ProductionAssignment>,
    /// Cohort on the shorter 08:00-18:00 schedule.
    pub alternate_schedule: Vec<String>,
}

/// Resolves departments and expected schedules for employees.
///
/// Holds the rosters plus any persisted department overrides; resolution
/// itself is a pure lookup with no I/O.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    rosters: Rosters,
    overrides: HashMap<String, ShiftWindow>,
}

impl ScheduleBook {
    /// Build a schedule book from rosters and department overrides
    /// (keyed by department storage key).
    pub fn new(rosters: Rosters, overrides: HashMap<String, ShiftWindow>) -> Self {
        Self { rosters, overrides }
    }

    /// Department for an employee name; `Others` when no roster matches.
    pub fn department_for(&self, name: &str) -> Department {
        let name = name.trim().to_lowercase();

        if roster_match(&self.rosters.administration, &name) {
            return Department::Administration;
        }
        if roster_match(&self.rosters.supervisor, &name) {
            return Department::Supervisor;
        }
        if roster_match(&self.rosters.packing, &name) {
            return Department::Packing;
        }
        if let Some(assignment) = self
            .rosters
            .production
            .iter()
            .find(|a| name.contains(&a.name.trim().to_lowercase()))
        {
            return Department::Production {
                sub_department: assignment.sub_department.clone(),
                category: assignment.category,
            };
        }

        Department::Others
    }

    /// Whether the employee belongs to the shorter-shift cohort.
    pub fn is_alternate(&self, name: &str) -> bool {
        roster_match(&self.rosters.alternate_schedule, &name.trim().to_lowercase())
    }

    /// Resolve the expected schedule for an employee.
    ///
    /// Precedence: administration policy, then the alternate-schedule
    /// roster, then a persisted department override, then the standard
    /// long shift. A department with no override falls through to the
    /// standard default rather than failing.
    pub fn resolve(&self, employee_name: &str, department: &Department) -> ScheduleRule {
        if matches!(department, Department::Administration) {
            return ScheduleRule::administration();
        }
        if self.is_alternate(employee_name) {
            return ScheduleRule::alternate();
        }
        if let Some(window) = self.overrides.get(department.key()) {
            return ScheduleRule::from_window(*window);
        }
        ScheduleRule::standard()
    }
}

fn roster_match(roster: &[String], lowercase_name: &str) -> bool {
    roster
        .iter()
        .any(|entry| lowercase_name.contains(&entry.trim().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> ScheduleBook {
        let rosters = Rosters {
            administration: vec!["mian abdullah".to_string()],
            supervisor: vec!["shafqat".to_string()],
            packing: vec!["iqra bibi".to_string()],
            production: vec![ProductionAssignment {
                name: "irfanneedle".to_string(),
                sub_department: Some("needle".to_string()),
                category: Some(ProductionCategory::Master),
            }],
            alternate_schedule: vec!["iqra bibi".to_string()],
        };
        let mut overrides = HashMap::new();
        overrides.insert(
            "supervisor".to_string(),
            ShiftWindow {
                entry: ClockTime::from_hm(7, 0),
                exit: ClockTime::from_hm(19, 0),
            },
        );
        ScheduleBook::new(rosters, overrides)
    }

    #[test]
    fn test_department_for_matches_case_insensitively() {
        let book = book();
        assert_eq!(book.department_for(" Mian Abdullah "), Department::Administration);
        assert_eq!(book.department_for("SHAFQAT"), Department::Supervisor);
        assert_eq!(book.department_for("someone new"), Department::Others);
    }

    #[test]
    fn test_department_for_production_carries_detail() {
        let dept = book().department_for("irfanneedle");
        assert_eq!(
            dept,
            Department::Production {
                sub_department: Some("needle".to_string()),
                category: Some(ProductionCategory::Master),
            }
        );
    }

    #[test]
    fn test_resolve_administration_policy_wins() {
        let rule = book().resolve("mian abdullah", &Department::Administration);
        assert_eq!(rule.entry.minutes(), 540);
        assert_eq!(rule.exit.minutes(), 1080);
        assert_eq!(rule.expected_hours, 9.0);
    }

    #[test]
    fn test_resolve_alternate_roster_beats_override() {
        // iqra bibi is packing, but the alternate cohort rule comes first.
        let rule = book().resolve("iqra bibi", &Department::Packing);
        assert_eq!(rule.expected_hours, 10.0);
        assert_eq!(rule.exit.minutes(), 1080);
    }

    #[test]
    fn test_resolve_department_override() {
        let rule = book().resolve("shafqat", &Department::Supervisor);
        assert_eq!(rule.entry.minutes(), 420);
        assert_eq!(rule.exit.minutes(), 1140);
        assert_eq!(rule.expected_hours, 12.0);
    }

    #[test]
    fn test_resolve_falls_back_to_standard() {
        let rule = book().resolve("someone new", &Department::Others);
        assert_eq!(rule.entry.minutes(), 480);
        assert_eq!(rule.exit.minutes(), 1200);
        assert_eq!(rule.expected_hours, 12.0);
    }

    #[test]
    fn test_night_shift_window_rule() {
        let rule = ScheduleRule::from_window(ShiftWindow {
            entry: ClockTime::from_hm(18, 0),
            exit: ClockTime::from_hm(6, 0),
        });
        assert!(rule.crosses_midnight());
        assert_eq!(rule.expected_minutes(), 720);
        assert_eq!(rule.expected_hours, 12.0);
    }
}
