use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::fees::entities::FeeStatus;

/// 创建收费标准请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct CreateFeeStructureRequest {
    pub school_id: i64,
    pub class_id: i64,
    pub fee_type: String,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub academic_year: String,
    #[ts(type = "string")]
    pub late_fee_percentage: Option<Decimal>,
}

/// 创建缴费记录请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct CreateFeeRecordRequest {
    pub student_id: i64,
    pub fee_structure_id: i64,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub late_fee: Option<Decimal>,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
}

/// 缴费请求（make-payment 动作）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct MakePaymentRequest {
    #[ts(type = "string")]
    pub amount: Decimal,
    pub payment_method: String,
    pub payment_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    pub remarks: Option<String>,
}

/// 缴费记录列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeRecordListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub status: Option<FeeStatus>,
    pub academic_year: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct FeeRecordListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<FeeStatus>,
    pub academic_year: Option<String>,
}

impl From<FeeRecordListParams> for FeeRecordListQuery {
    fn from(params: FeeRecordListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            status: params.status,
            academic_year: params.academic_year,
        }
    }
}

/// 收费标准列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fees.ts")]
pub struct FeeStructureListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct FeeStructureListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_id: Option<i64>,
    pub class_id: Option<i64>,
    pub academic_year: Option<String>,
}

impl From<FeeStructureListParams> for FeeStructureListQuery {
    fn from(params: FeeStructureListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            school_id: None,
            class_id: params.class_id,
            academic_year: params.academic_year,
        }
    }
}
