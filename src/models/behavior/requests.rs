use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::behavior::entities::BehaviorKind;
use crate::models::common::pagination::PaginationQuery;

/// 创建行为类别请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct CreateBehaviorCategoryRequest {
    pub school_id: i64,
    pub name: String,
    pub kind: BehaviorKind,
    pub points: i32,
}

/// 创建行为记录请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct CreateBehaviorLogRequest {
    pub student_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date_recorded: NaiveDate,
    pub action_taken: Option<String>,
    #[serde(default)]
    pub parent_notified: bool,
}

/// 行为记录列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorLogListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub category_id: Option<i64>,
    pub kind: Option<BehaviorKind>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct BehaviorLogListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub category_id: Option<i64>,
    pub kind: Option<BehaviorKind>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl From<BehaviorLogListParams> for BehaviorLogListQuery {
    fn from(params: BehaviorLogListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            category_id: params.category_id,
            kind: params.kind,
            date_from: params.date_from,
            date_to: params.date_to,
        }
    }
}
