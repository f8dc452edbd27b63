//! 行为记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "behavior_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub category_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub date_recorded: Date,
    pub reported_by: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub action_taken: Option<String>,
    pub parent_notified: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::behavior_categories::Entity",
        from = "Column::CategoryId",
        to = "super::behavior_categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReportedBy",
        to = "super::users::Column::Id"
    )]
    Reporter,
}

impl Related<super::behavior_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_behavior_log(self) -> crate::models::behavior::entities::BehaviorLog {
        use chrono::{DateTime, Utc};

        crate::models::behavior::entities::BehaviorLog {
            id: self.id,
            school_id: self.school_id,
            student_id: self.student_id,
            category_id: self.category_id,
            title: self.title,
            description: self.description,
            date_recorded: self.date_recorded,
            reported_by: self.reported_by,
            action_taken: self.action_taken,
            parent_notified: self.parent_notified,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
