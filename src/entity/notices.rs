//! 通知公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub priority: String,
    pub attachment_token: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    pub publish_date: i64,
    pub expiry_date: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::notice_classes::Entity")]
    NoticeClasses,
}

impl Related<super::notice_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NoticeClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 目标班级来自关联表，由调用方查好后传入
    pub fn into_notice(
        self,
        target_class_ids: Vec<i64>,
    ) -> crate::models::notices::entities::Notice {
        use crate::models::notices::entities::NoticePriority;
        use chrono::{DateTime, Utc};

        crate::models::notices::entities::Notice {
            id: self.id,
            school_id: self.school_id,
            title: self.title,
            content: self.content,
            priority: self
                .priority
                .parse::<NoticePriority>()
                .unwrap_or(NoticePriority::Medium),
            target_class_ids,
            attachment_token: self.attachment_token,
            created_by: self.created_by,
            is_active: self.is_active,
            publish_date: DateTime::<Utc>::from_timestamp(self.publish_date, 0)
                .unwrap_or_default(),
            expiry_date: self
                .expiry_date
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
