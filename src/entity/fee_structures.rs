//! 收费标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub class_id: i64,
    pub fee_type: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub academic_year: String,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub late_fee_percentage: Decimal,
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
    #[sea_orm(has_many = "super::fee_records::Entity")]
    FeeRecords,
}

impl Related<super::fee_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_structure(self) -> crate::models::fees::entities::FeeStructure {
        use chrono::{DateTime, Utc};

        crate::models::fees::entities::FeeStructure {
            id: self.id,
            school_id: self.school_id,
            class_id: self.class_id,
            fee_type: self.fee_type,
            amount: self.amount,
            academic_year: self.academic_year,
            late_fee_percentage: self.late_fee_percentage,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
