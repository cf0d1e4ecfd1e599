//! Attendance repository: the durable record store.

use crate::engine::clock::ClockTime;
use crate::entities::{daily_attendance, prelude::*};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::department::{Department, ProductionCategory};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::warn;

/// Upsert a batch of attendance records keyed by (employee_no, work_date).
///
/// Re-imports of the same sheet overwrite the derived fields in place.
/// Returns the count of successfully stored records.
pub async fn upsert(db: &DatabaseConnection, records: &[AttendanceRecord]) -> Result<usize, DbErr> {
    let mut stored = 0;

    for record in records {
        let result = DailyAttendance::insert(to_active(record))
            .on_conflict(
                OnConflict::columns([
                    daily_attendance::Column::EmployeeNo,
                    daily_attendance::Column::WorkDate,
                ])
                .update_columns([
                    daily_attendance::Column::EmployeeName,
                    daily_attendance::Column::Department,
                    daily_attendance::Column::SubDepartment,
                    daily_attendance::Column::ProductionCategory,
                    daily_attendance::Column::EntryMinutes,
                    daily_attendance::Column::ExitMinutes,
                    daily_attendance::Column::TotalHours,
                    daily_attendance::Column::Status,
                ])
                .to_owned(),
            )
            .exec(db)
            .await;

        if result.is_ok() {
            stored += 1;
        }
    }

    Ok(stored)
}

/// Get all records for one calendar date.
pub async fn find_by_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, DbErr> {
    let models = DailyAttendance::find()
        .filter(daily_attendance::Column::WorkDate.eq(date))
        .order_by_asc(daily_attendance::Column::EmployeeName)
        .all(db)
        .await?;

    Ok(models.iter().map(to_record).collect())
}

/// Get all records within a date range, oldest first.
pub async fn find_by_date_range(
    db: &DatabaseConnection,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, DbErr> {
    let models = DailyAttendance::find()
        .filter(daily_attendance::Column::WorkDate.between(start_date, end_date))
        .order_by_asc(daily_attendance::Column::WorkDate)
        .order_by_asc(daily_attendance::Column::EmployeeName)
        .all(db)
        .await?;

    Ok(models.iter().map(to_record).collect())
}

/// Get one employee's history, oldest first, optionally since a date.
pub async fn find_by_employee(
    db: &DatabaseConnection,
    employee_name: &str,
    since: Option<NaiveDate>,
) -> Result<Vec<AttendanceRecord>, DbErr> {
    let mut query = DailyAttendance::find()
        .filter(daily_attendance::Column::EmployeeName.eq(employee_name));

    if let Some(since) = since {
        query = query.filter(daily_attendance::Column::WorkDate.gte(since));
    }

    let models = query
        .order_by_asc(daily_attendance::Column::WorkDate)
        .all(db)
        .await?;

    Ok(models.iter().map(to_record).collect())
}

/// Delete all records for a calendar date. Returns rows removed.
pub async fn delete_by_date(db: &DatabaseConnection, date: NaiveDate) -> Result<u64, DbErr> {
    let result = DailyAttendance::delete_many()
        .filter(daily_attendance::Column::WorkDate.eq(date))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Convert a stored row into a domain record.
///
/// Unknown department or status strings degrade with a warning instead
/// of failing the load.
pub fn to_record(model: &daily_attendance::Model) -> AttendanceRecord {
    let status = AttendanceStatus::parse_key(&model.status).unwrap_or_else(|| {
        warn!(
            "Unknown status '{}' for {} on {}, treating as missing checkout",
            model.status, model.employee_name, model.work_date
        );
        AttendanceStatus::MissingCheckout
    });

    AttendanceRecord {
        employee_no: model.employee_no.clone(),
        employee_name: model.employee_name.clone(),
        date: model.work_date,
        department: department_of(model),
        entry: model.entry_minutes.map(minutes_to_clock),
        exit: model.exit_minutes.map(minutes_to_clock),
        total_hours: model.total_hours,
        status,
    }
}

/// Convert a domain record into an active model for insert/update.
pub fn to_active(record: &AttendanceRecord) -> daily_attendance::ActiveModel {
    let (sub_department, production_category) = match &record.department {
        Department::Production {
            sub_department,
            category,
        } => (
            sub_department.clone(),
            category.map(|c| c.key().to_string()),
        ),
        _ => (None, None),
    };

    daily_attendance::ActiveModel {
        employee_no: Set(record.employee_no.clone()),
        employee_name: Set(record.employee_name.clone()),
        work_date: Set(record.date),
        department: Set(record.department.key().to_string()),
        sub_department: Set(sub_department),
        production_category: Set(production_category),
        entry_minutes: Set(record.entry.map(|t| i32::from(t.minutes()))),
        exit_minutes: Set(record.exit.map(|t| i32::from(t.minutes()))),
        total_hours: Set(record.total_hours),
        status: Set(record.status.key().to_string()),
        ..Default::default()
    }
}

fn department_of(model: &daily_attendance::Model) -> Department {
    match Department::parse_key(&model.department) {
        Some(Department::Production { .. }) => Department::Production {
            sub_department: model.sub_department.clone(),
            category: model
                .production_category
                .as_deref()
                .and_then(ProductionCategory::parse_key),
        },
        Some(dept) => dept,
        None => {
            warn!(
                "Unknown department '{}' for {}, treating as others",
                model.department, model.employee_name
            );
            Department::Others
        }
    }
}

fn minutes_to_clock(minutes: i32) -> ClockTime {
    ClockTime::from_minutes(minutes.clamp(0, i32::from(u16::MAX)) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> daily_attendance::Model {
        daily_attendance::Model {
            id: 1,
            employee_no: "3".to_string(),
            employee_name: "bilal ali".to_string(),
            work_date: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            department: "packing".to_string(),
            sub_department: None,
            production_category: None,
            entry_minutes: Some(480),
            exit_minutes: Some(1200),
            total_hours: 12.0,
            status: "onTime".to_string(),
        }
    }

    #[test]
    fn test_to_record_maps_fields() {
        let record = to_record(&model());
        assert_eq!(record.department, Department::Packing);
        assert_eq!(record.entry.unwrap().minutes(), 480);
        assert_eq!(record.exit.unwrap().minutes(), 1200);
        assert_eq!(record.status, AttendanceStatus::OnTime);
    }

    #[test]
    fn test_to_record_rebuilds_production_detail() {
        let mut model = model();
        model.department = "production".to_string();
        model.sub_department = Some("needle".to_string());
        model.production_category = Some("master".to_string());

        let record = to_record(&model);
        assert_eq!(
            record.department,
            Department::Production {
                sub_department: Some("needle".to_string()),
                category: Some(ProductionCategory::Master),
            }
        );
    }

    #[test]
    fn test_to_record_degrades_unknown_strings() {
        let mut model = model();
        model.department = "warehouse".to_string();
        model.status = "absent".to_string();

        let record = to_record(&model);
        assert_eq!(record.department, Department::Others);
        assert_eq!(record.status, AttendanceStatus::MissingCheckout);
    }

    #[test]
    fn test_round_trip_through_active_model() {
        let record = to_record(&model());
        let active = to_active(&record);
        assert_eq!(active.department, Set("packing".to_string()));
        assert_eq!(active.entry_minutes, Set(Some(480)));
        assert_eq!(active.status, Set("onTime".to_string()));
        // The id stays unset so the database assigns it.
        assert_eq!(active.id, NotSet);
    }
}
