//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub school_id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
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
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
    #[sea_orm(has_many = "super::teacher_sections::Entity")]
    TeacherSections,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 任课科目与分管分班来自关联表，由调用方查好后传入
    pub fn into_teacher_profile(
        self,
        subject_ids: Vec<i64>,
        section_ids: Vec<i64>,
    ) -> crate::models::org::entities::TeacherProfile {
        use chrono::{DateTime, Utc};

        crate::models::org::entities::TeacherProfile {
            id: self.id,
            user_id: self.user_id,
            school_id: self.school_id,
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            subject_ids,
            section_ids,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
