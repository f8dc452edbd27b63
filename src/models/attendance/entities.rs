//! 考勤实体与月度汇总计算。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academic::entities::round2;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            "excused" => Ok(AttendanceStatus::Excused),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录
//
// (student, class, subject, date) 唯一；重复标记走 upsert 更新。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    /// 为空表示全天考勤而非单科考勤
    pub subject_id: Option<i64>,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: i64,
    pub remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 月度考勤汇总
//
// 派生数据：每次考勤记录写入后由写入路径同步重算。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub id: i64,
    pub student_id: i64,
    /// 当月第一天
    pub month: chrono::NaiveDate,
    pub total_days: i32,
    pub present_days: i32,
    pub absent_days: i32,
    pub late_days: i32,
    pub excused_days: i32,
    pub attendance_percentage: f64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 各状态计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTally {
    pub total: i32,
    pub present: i32,
    pub absent: i32,
    pub late: i32,
    pub excused: i32,
}

impl AttendanceTally {
    pub fn from_statuses(statuses: &[AttendanceStatus]) -> Self {
        let mut tally = Self::default();
        for status in statuses {
            tally.total += 1;
            match status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Absent => tally.absent += 1,
                AttendanceStatus::Late => tally.late += 1,
                AttendanceStatus::Excused => tally.excused += 1,
            }
        }
        tally
    }

    /// 出勤率（%），保留两位小数；无记录时为 0 而非错误
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round2(self.present as f64 / self.total as f64 * 100.0)
    }
}

/// 归一化到当月第一天
pub fn month_bucket(date: chrono::NaiveDate) -> chrono::NaiveDate {
    use chrono::Datelike;
    chrono::NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_tally_counts_sum_to_total() {
        let statuses = vec![
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
            AttendanceStatus::Excused,
        ];
        let tally = AttendanceTally::from_statuses(&statuses);
        assert_eq!(tally.total, 5);
        assert_eq!(
            tally.present + tally.absent + tally.late + tally.excused,
            tally.total
        );
    }

    #[test]
    fn test_percentage_rounding() {
        // 1/3 -> 33.33
        let tally = AttendanceTally::from_statuses(&[
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Absent,
        ]);
        assert_eq!(tally.percentage(), 33.33);
    }

    #[test]
    fn test_percentage_zero_total() {
        let tally = AttendanceTally::default();
        assert_eq!(tally.percentage(), 0.0);
    }

    #[test]
    fn test_percentage_all_present() {
        let tally = AttendanceTally::from_statuses(&[AttendanceStatus::Present; 20]);
        assert_eq!(tally.percentage(), 100.0);
    }

    #[test]
    fn test_month_bucket() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        assert_eq!(
            month_bucket(date),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }
}
