use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attendance::entities::{AttendanceRecord, AttendanceSummary};
use crate::models::common::pagination::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
    pub pagination: PaginationInfo,
}

/// 批量点名结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkMarkResponse {
    pub marked_count: i64,
    pub records: Vec<AttendanceRecord>,
}

/// 考勤统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatisticsResponse {
    pub total_records: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
    pub attendance_percentage: f64,
}

/// 班级考勤报表行
///
/// 未点名的学生也在报表中，status 为 "not_marked"。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClassReportRow {
    pub student_id: i64,
    pub student_name: String,
    pub roll_number: Option<String>,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ClassReportResponse {
    pub class_id: i64,
    pub section_id: i64,
    pub date: chrono::NaiveDate,
    pub students: Vec<ClassReportRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SummaryListResponse {
    pub items: Vec<AttendanceSummary>,
    pub pagination: PaginationInfo,
}
