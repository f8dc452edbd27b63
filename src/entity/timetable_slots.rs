//! 课程表实体
//!
//! (class_id, section_id, weekday, start_time) 唯一；冲突即报错，不做 upsert。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetable_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub weekday: String,
    pub weekday_order: i32,
    pub start_time: Time,
    pub end_time: Time,
    pub room: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teacher_profiles::Entity",
        from = "Column::TeacherId",
        to = "super::teacher_profiles::Column::Id"
    )]
    Teacher,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_timetable_slot(self) -> crate::models::academic::entities::TimetableSlot {
        use crate::models::academic::entities::Weekday;
        use chrono::{DateTime, Utc};

        crate::models::academic::entities::TimetableSlot {
            id: self.id,
            school_id: self.school_id,
            class_id: self.class_id,
            section_id: self.section_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            weekday: self.weekday.parse::<Weekday>().unwrap_or(Weekday::Monday),
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
