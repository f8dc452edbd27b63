//! 缴费流水实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fee_record_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub payment_method: String,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub reference_number: Option<String>,
    pub payment_date: Date,
    pub received_by: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fee_records::Entity",
        from = "Column::FeeRecordId",
        to = "super::fee_records::Column::Id"
    )]
    FeeRecord,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReceivedBy",
        to = "super::users::Column::Id"
    )]
    Receiver,
}

impl Related<super::fee_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee_payment(self) -> crate::models::fees::entities::FeePayment {
        use chrono::{DateTime, Utc};

        crate::models::fees::entities::FeePayment {
            id: self.id,
            fee_record_id: self.fee_record_id,
            amount: self.amount,
            payment_method: self.payment_method,
            transaction_id: self.transaction_id,
            reference_number: self.reference_number,
            payment_date: self.payment_date,
            received_by: self.received_by,
            remarks: self.remarks,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
