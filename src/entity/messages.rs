//! 站内消息实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub sender_id: i64,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub message_type: String,
    pub priority: String,
    pub sent_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id"
    )]
    Sender,
    #[sea_orm(has_many = "super::message_recipients::Entity")]
    Recipients,
    #[sea_orm(has_many = "super::message_reads::Entity")]
    Reads,
}

impl Related<super::message_recipients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipients.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sender.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 收件人来自关联表，由调用方查好后传入
    pub fn into_message(
        self,
        recipient_ids: Vec<i64>,
    ) -> crate::models::messages::entities::Message {
        use crate::models::messages::entities::MessageType;
        use crate::models::notices::entities::NoticePriority;
        use chrono::{DateTime, Utc};

        crate::models::messages::entities::Message {
            id: self.id,
            school_id: self.school_id,
            sender_id: self.sender_id,
            recipient_ids,
            subject: self.subject,
            content: self.content,
            message_type: self
                .message_type
                .parse::<MessageType>()
                .unwrap_or(MessageType::Individual),
            priority: self
                .priority
                .parse::<NoticePriority>()
                .unwrap_or(NoticePriority::Medium),
            sent_at: DateTime::<Utc>::from_timestamp(self.sent_at, 0).unwrap_or_default(),
        }
    }
}
