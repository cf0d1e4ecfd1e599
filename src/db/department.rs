//! Department schedule repository: persisted shift-window overrides.

use crate::engine::clock::ClockTime;
use crate::engine::schedule::ShiftWindow;
use crate::entities::{department_schedule, prelude::*};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashMap;

/// Load all persisted overrides, keyed by department storage key.
pub async fn load_overrides(
    db: &DatabaseConnection,
) -> Result<HashMap<String, ShiftWindow>, DbErr> {
    let models = DepartmentSchedule::find().all(db).await?;

    Ok(models
        .into_iter()
        .map(|m| (m.department.clone(), to_window(&m)))
        .collect())
}

/// Get the persisted override for one department.
pub async fn get_schedule(
    db: &DatabaseConnection,
    department: &str,
) -> Result<Option<ShiftWindow>, DbErr> {
    let model = DepartmentSchedule::find()
        .filter(department_schedule::Column::Department.eq(department))
        .one(db)
        .await?;

    Ok(model.map(|m| to_window(&m)))
}

/// Persist an override for one department, replacing any existing one.
pub async fn set_schedule(
    db: &DatabaseConnection,
    department: &str,
    window: ShiftWindow,
) -> Result<(), DbErr> {
    let model = department_schedule::ActiveModel {
        department: Set(department.to_string()),
        entry_minutes: Set(i32::from(window.entry.minutes())),
        exit_minutes: Set(i32::from(window.exit.minutes())),
        ..Default::default()
    };

    DepartmentSchedule::insert(model)
        .on_conflict(
            OnConflict::column(department_schedule::Column::Department)
                .update_columns([
                    department_schedule::Column::EntryMinutes,
                    department_schedule::Column::ExitMinutes,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

fn to_window(model: &department_schedule::Model) -> ShiftWindow {
    ShiftWindow {
        entry: ClockTime::from_minutes(model.entry_minutes.clamp(0, 1439) as u16),
        exit: ClockTime::from_minutes(model.exit_minutes.clamp(0, 1439) as u16),
    }
}
