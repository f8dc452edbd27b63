use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::fees::entities::{FeePayment, FeeRecord, FeeStructure};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeStructureListResponse {
    pub items: Vec<FeeStructure>,
    pub pagination: PaginationInfo,
}

/// 缴费记录条目（附带未结余额与流水）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeRecordListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: FeeRecord,
    #[ts(type = "string")]
    pub outstanding_amount: Decimal,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeRecordListResponse {
    pub items: Vec<FeeRecordListItem>,
    pub pagination: PaginationInfo,
}

/// 缴费记录详情（附流水）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeRecordDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: FeeRecordListItem,
    pub payments: Vec<FeePayment>,
}

/// 缴费结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct PaymentResponse {
    pub payment: FeePayment,
    pub record: FeeRecordListItem,
}

/// 费用汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeSummaryResponse {
    #[ts(type = "string")]
    pub total_amount: Decimal,
    #[ts(type = "string")]
    pub paid_amount: Decimal,
    #[ts(type = "string")]
    pub late_fee: Decimal,
    #[ts(type = "string")]
    pub outstanding_amount: Decimal,
    pub pending_records: i64,
    pub overdue_records: i64,
}
