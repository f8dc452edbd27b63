//! 作业与提交实体。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Draft,
    Assigned,
    Graded,
    Archived,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Draft => "draft",
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Graded => "graded",
            AssignmentStatus::Archived => "archived",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "assigned" => Ok(AssignmentStatus::Assigned),
            "graded" => Ok(AssignmentStatus::Graded),
            "archived" => Ok(AssignmentStatus::Archived),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionStatus {
    Submitted,
    Late,
    Graded,
    Returned,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Late => "late",
            SubmissionStatus::Graded => "graded",
            SubmissionStatus::Returned => "returned",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "late" => Ok(SubmissionStatus::Late),
            "graded" => Ok(SubmissionStatus::Graded),
            "returned" => Ok(SubmissionStatus::Returned),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    /// 创建教师（用户 ID），作业可见性按创建者过滤
    pub teacher_id: i64,
    pub assigned_date: chrono::DateTime<chrono::Utc>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_marks: i32,
    pub status: AssignmentStatus,
    pub instructions: Option<String>,
    pub attachment_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作业提交
//
// (assignment, student) 唯一；重复提交原地更新。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentSubmission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submission_text: Option<String>,
    pub attachment_token: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub status: SubmissionStatus,
    pub marks_obtained: Option<f64>,
    pub teacher_feedback: Option<String>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 迟交判定：严格晚于截止时间才算迟交，恰好等于截止时间视为按时
pub fn is_late(
    submitted_at: chrono::DateTime<chrono::Utc>,
    due_date: chrono::DateTime<chrono::Utc>,
) -> bool {
    submitted_at > due_date
}

impl AssignmentSubmission {
    pub fn grade_percentage(&self, max_marks: i32) -> Option<f64> {
        match self.marks_obtained {
            Some(marks) if max_marks > 0 => Some(marks / max_marks as f64 * 100.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_on_time_at_exact_deadline() {
        let due = Utc.with_ymd_and_hms(2026, 6, 1, 23, 59, 59).unwrap();
        assert!(!is_late(due, due));
    }

    #[test]
    fn test_late_one_second_after() {
        let due = Utc.with_ymd_and_hms(2026, 6, 1, 23, 59, 59).unwrap();
        let submitted = due + chrono::TimeDelta::seconds(1);
        assert!(is_late(submitted, due));
    }

    #[test]
    fn test_on_time_before_deadline() {
        let due = Utc.with_ymd_and_hms(2026, 6, 1, 23, 59, 59).unwrap();
        let submitted = due - chrono::TimeDelta::hours(2);
        assert!(!is_late(submitted, due));
    }

    #[test]
    fn test_grade_percentage() {
        let sub = AssignmentSubmission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            submission_text: None,
            attachment_token: None,
            submitted_at: Utc::now(),
            status: SubmissionStatus::Graded,
            marks_obtained: Some(80.0),
            teacher_feedback: None,
            graded_by: Some(2),
            graded_at: Some(Utc::now()),
        };
        assert_eq!(sub.grade_percentage(100), Some(80.0));
        assert_eq!(sub.grade_percentage(0), None);
    }
}
