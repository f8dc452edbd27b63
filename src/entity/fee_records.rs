//! 缴费记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub fee_structure_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub late_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub paid_amount: Decimal,
    pub due_date: Date,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
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
        belongs_to = "super::fee_structures::Entity",
        from = "Column::FeeStructureId",
        to = "super::fee_structures::Column::Id"
    )]
    FeeStructure,
    #[sea_orm(has_many = "super::fee_payments::Entity")]
    Payments,
}

impl Related<super::fee_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::fee_structures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeStructure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_record(self) -> crate::models::fees::entities::FeeRecord {
        use crate::models::fees::entities::FeeStatus;
        use chrono::{DateTime, Utc};

        crate::models::fees::entities::FeeRecord {
            id: self.id,
            school_id: self.school_id,
            student_id: self.student_id,
            fee_structure_id: self.fee_structure_id,
            amount: self.amount,
            late_fee: self.late_fee,
            paid_amount: self.paid_amount,
            due_date: self.due_date,
            status: self.status.parse::<FeeStatus>().unwrap_or(FeeStatus::Pending),
            remarks: self.remarks,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
