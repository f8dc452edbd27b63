//! 家长档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::parent_children::Entity")]
    ParentChildren,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 子女列表来自关联表，由调用方查好后传入
    pub fn into_parent_profile(
        self,
        children_ids: Vec<i64>,
    ) -> crate::models::org::entities::ParentProfile {
        use chrono::{DateTime, Utc};

        crate::models::org::entities::ParentProfile {
            id: self.id,
            user_id: self.user_id,
            school_id: self.school_id,
            first_name: self.first_name,
            last_name: self.last_name,
            occupation: self.occupation,
            children_ids,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
