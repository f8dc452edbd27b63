//! 行为类别实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "behavior_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub kind: String,
    pub points: i32,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::behavior_logs::Entity")]
    BehaviorLogs,
}

impl Related<super::behavior_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BehaviorLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_behavior_category(self) -> crate::models::behavior::entities::BehaviorCategory {
        use crate::models::behavior::entities::BehaviorKind;
        use chrono::{DateTime, Utc};

        crate::models::behavior::entities::BehaviorCategory {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            kind: self.kind.parse::<BehaviorKind>().unwrap_or(BehaviorKind::Neutral),
            points: self.points,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
