//! 消息已读回执实体
//!
//! (message_id, user_id) 唯一，重复标记已读幂等。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "message_reads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub read_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::messages::Entity",
        from = "Column::MessageId",
        to = "super::messages::Column::Id"
    )]
    Message,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message_read(self) -> crate::models::messages::entities::MessageRead {
        use chrono::{DateTime, Utc};

        crate::models::messages::entities::MessageRead {
            id: self.id,
            message_id: self.message_id,
            user_id: self.user_id,
            read_at: DateTime::<Utc>::from_timestamp(self.read_at, 0).unwrap_or_default(),
        }
    }
}
