//! 学业实体：考试、成绩、课程表。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub enum ExamType {
    MidTerm,
    Final,
    UnitTest,
    Quiz,
    Assignment,
    Project,
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamType::MidTerm => "mid_term",
            ExamType::Final => "final",
            ExamType::UnitTest => "unit_test",
            ExamType::Quiz => "quiz",
            ExamType::Assignment => "assignment",
            ExamType::Project => "project",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mid_term" => Ok(ExamType::MidTerm),
            "final" => Ok(ExamType::Final),
            "unit_test" => Ok(ExamType::UnitTest),
            "quiz" => Ok(ExamType::Quiz),
            "assignment" => Ok(ExamType::Assignment),
            "project" => Ok(ExamType::Project),
            _ => Err(format!("Invalid exam type: {s}")),
        }
    }
}

// 考试
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct Exam {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub exam_type: ExamType,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub max_marks: i32,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 成绩
//
// (student_id, exam_id) 唯一；重复录入走 upsert 更新。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub marks_obtained: f64,
    /// 由 marks_obtained / max_marks 推导，不接受客户端提交
    pub grade_letter: String,
    pub remarks: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

// 周几（课程表用）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 排序序号，周一为 0
    pub fn order(&self) -> i32 {
        *self as i32
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

// 课程表条目
//
// (class, section, weekday, start_time) 唯一；重复创建返回冲突而非 upsert。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct TimetableSlot {
    pub id: i64,
    pub school_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub weekday: Weekday,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 四舍五入保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 百分比换算
pub fn mark_percentage(marks_obtained: f64, max_marks: i32) -> f64 {
    if max_marks <= 0 {
        return 0.0;
    }
    marks_obtained / max_marks as f64 * 100.0
}

/// 等第划分，各档下界含等号
pub fn letter_grade(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A+"
    } else if percentage >= 80.0 {
        "A"
    } else if percentage >= 70.0 {
        "B+"
    } else if percentage >= 60.0 {
        "B"
    } else if percentage >= 50.0 {
        "C"
    } else if percentage >= 40.0 {
        "D"
    } else {
        "F"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(mark_percentage(45.0, 50), 90.0);
        assert_eq!(mark_percentage(0.0, 100), 0.0);
        assert_eq!(mark_percentage(100.0, 100), 100.0);
    }

    #[test]
    fn test_percentage_zero_max_marks() {
        assert_eq!(mark_percentage(10.0, 0), 0.0);
    }

    #[test]
    fn test_grade_band_boundaries_inclusive() {
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.999), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(70.0), "B+");
        assert_eq!(letter_grade(60.0), "B");
        assert_eq!(letter_grade(50.0), "C");
        assert_eq!(letter_grade(40.0), "D");
        assert_eq!(letter_grade(39.999), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_grade_from_marks() {
        // 45/50 -> 90% -> A+
        let pct = mark_percentage(45.0, 50);
        assert_eq!(letter_grade(pct), "A+");
    }

    #[test]
    fn test_weekday_order() {
        assert_eq!(Weekday::Monday.order(), 0);
        assert_eq!(Weekday::Sunday.order(), 6);
        assert!(Weekday::Tuesday < Weekday::Friday);
    }
}
