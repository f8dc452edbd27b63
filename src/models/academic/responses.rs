use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academic::entities::{Exam, Mark, TimetableSlot};
use crate::models::common::pagination::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
    pub pagination: PaginationInfo,
}

/// 成绩条目（附带百分比）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct MarkListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub mark: Mark,
    pub max_marks: i32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct MarkListResponse {
    pub items: Vec<MarkListItem>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct TimetableListResponse {
    pub items: Vec<TimetableSlot>,
    pub pagination: PaginationInfo,
}

/// 单科成绩摘要（学生成绩汇总用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct SubjectPerformance {
    pub subject_id: i64,
    pub subject_name: String,
    pub marks: Vec<MarkListItem>,
    pub average_percentage: f64,
}

/// 学生成绩汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct StudentPerformanceResponse {
    pub student_id: i64,
    pub student_name: String,
    pub subjects: Vec<SubjectPerformance>,
    pub overall_percentage: f64,
    pub overall_grade: String,
}
