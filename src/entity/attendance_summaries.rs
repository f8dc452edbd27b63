//! 月度考勤汇总实体（派生数据）
//!
//! (student_id, month) 唯一；由考勤写入路径同步重算。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub month: Date,
    pub total_days: i32,
    pub present_days: i32,
    pub absent_days: i32,
    pub late_days: i32,
    pub excused_days: i32,
    pub attendance_percentage: f64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance_summary(self) -> crate::models::attendance::entities::AttendanceSummary {
        use chrono::{DateTime, Utc};

        crate::models::attendance::entities::AttendanceSummary {
            id: self.id,
            student_id: self.student_id,
            month: self.month,
            total_days: self.total_days,
            present_days: self.present_days,
            absent_days: self.absent_days,
            late_days: self.late_days,
            excused_days: self.excused_days,
            attendance_percentage: self.attendance_percentage,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
