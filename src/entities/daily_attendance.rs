//! `daily_attendance` table: one row per employee per calendar date.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_no: String,
    pub employee_name: String,
    pub work_date: Date,
    pub department: String,
    pub sub_department: Option<String>,
    pub production_category: Option<String>,
    pub entry_minutes: Option<i32>,
    pub exit_minutes: Option<i32>,
    pub total_hours: f64,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
