//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub exam_type: String,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub max_marks: i32,
    pub created_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
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
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::academic::entities::Exam {
        use crate::models::academic::entities::ExamType;
        use chrono::{DateTime, Utc};

        crate::models::academic::entities::Exam {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            exam_type: self
                .exam_type
                .parse::<ExamType>()
                .unwrap_or(ExamType::UnitTest),
            class_id: self.class_id,
            section_id: self.section_id,
            subject_id: self.subject_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            max_marks: self.max_marks,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
