use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::{Assignment, AssignmentSubmission, SubmissionStatus};
use crate::models::common::pagination::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<AssignmentSubmission>,
    pub pagination: PaginationInfo,
}

/// 作业统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentStatsResponse {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub total_students: i64,
    pub submitted_count: i64,
    pub graded_count: i64,
    pub late_count: i64,
    pub submission_percentage: f64,
    pub grading_percentage: f64,
    pub average_marks: Option<f64>,
}

/// 学生作业进度行
///
/// 未提交的作业也在结果中，submitted 为 false 而非缺行。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentProgressRow {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_marks: i32,
    pub submitted: bool,
    pub submission_status: Option<SubmissionStatus>,
    pub marks_obtained: Option<f64>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_late: bool,
    pub grade_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentProgressResponse {
    pub student_id: i64,
    pub student_name: String,
    pub assignments: Vec<StudentProgressRow>,
}
