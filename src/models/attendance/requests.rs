use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::attendance::entities::AttendanceStatus;
use crate::models::common::pagination::PaginationQuery;

/// 批量点名的单条记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// 批量点名请求
///
/// 同一 (student, class, subject, date) 重复提交是幂等的 upsert，
/// 整个批次在一个事务中提交。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkMarkAttendanceRequest {
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: Option<i64>,
    pub date: NaiveDate,
    pub entries: Vec<BulkAttendanceEntry>,
}

/// 考勤记录列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl From<AttendanceListParams> for AttendanceListQuery {
    fn from(params: AttendanceListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            class_id: params.class_id,
            section_id: params.section_id,
            subject_id: params.subject_id,
            student_id: params.student_id,
            date: params.date,
            date_from: params.date_from,
            date_to: params.date_to,
            status: params.status,
        }
    }
}

/// 考勤统计查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatisticsParams {
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// 班级考勤报表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClassReportParams {
    pub section_id: i64,
    pub date: NaiveDate,
    pub subject_id: Option<i64>,
}

/// 月度汇总列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SummaryListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SummaryListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
}

impl From<SummaryListParams> for SummaryListQuery {
    fn from(params: SummaryListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            student_id: params.student_id,
            class_id: params.class_id,
        }
    }
}
