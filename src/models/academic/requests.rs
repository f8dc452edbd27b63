use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::academic::entities::{ExamType, Weekday};
use crate::models::common::pagination::PaginationQuery;

/// 创建考试请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct CreateExamRequest {
    pub name: String,
    pub exam_type: ExamType,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_marks: i32,
}

/// 更新考试请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct UpdateExamRequest {
    pub name: Option<String>,
    pub exam_type: Option<ExamType>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub max_marks: Option<i32>,
}

/// 考试列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct ExamListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub exam_type: Option<ExamType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct ExamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub exam_type: Option<ExamType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl From<ExamListParams> for ExamListQuery {
    fn from(params: ExamListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            section_id: params.section_id,
            subject_id: params.subject_id,
            exam_type: params.exam_type,
            date_from: params.date_from,
            date_to: params.date_to,
        }
    }
}

/// 录入成绩请求
///
/// 同一 (student, exam) 重复录入更新原记录。grade_letter 由服务端推导。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct UpsertMarkRequest {
    pub student_id: i64,
    pub exam_id: i64,
    pub marks_obtained: f64,
    pub remarks: Option<String>,
}

/// 成绩列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct MarkListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub exam_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct MarkListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub exam_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
}

impl From<MarkListParams> for MarkListQuery {
    fn from(params: MarkListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            exam_id: params.exam_id,
            student_id: params.student_id,
            subject_id: params.subject_id,
        }
    }
}

/// 创建课程表条目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct CreateTimetableSlotRequest {
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: Option<String>,
}

/// 课程表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct TimetableListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub weekday: Option<Weekday>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct TimetableListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub weekday: Option<Weekday>,
}

impl From<TimetableListParams> for TimetableListQuery {
    fn from(params: TimetableListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            section_id: params.section_id,
            weekday: params.weekday,
        }
    }
}
