use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::behavior::entities::{BehaviorCategory, BehaviorLog};
use crate::models::common::pagination::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorCategoryListResponse {
    pub items: Vec<BehaviorCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorLogListResponse {
    pub items: Vec<BehaviorLog>,
    pub pagination: PaginationInfo,
}

/// 学生行为分汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorPointsResponse {
    pub student_id: i64,
    pub total_points: i32,
    pub positive_count: i64,
    pub negative_count: i64,
    pub neutral_count: i64,
}
