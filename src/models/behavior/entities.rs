use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 行为类别倾向
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub enum BehaviorKind {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BehaviorKind::Positive => "positive",
            BehaviorKind::Negative => "negative",
            BehaviorKind::Neutral => "neutral",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BehaviorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(BehaviorKind::Positive),
            "negative" => Ok(BehaviorKind::Negative),
            "neutral" => Ok(BehaviorKind::Neutral),
            _ => Err(format!("Invalid behavior kind: {s}")),
        }
    }
}

// 行为类别
//
// points 带符号：正向行为加分，负向行为扣分。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorCategory {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub kind: BehaviorKind,
    pub points: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 行为记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorLog {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date_recorded: chrono::NaiveDate,
    pub reported_by: i64,
    pub action_taken: Option<String>,
    pub parent_notified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 学生行为总分 = 各记录所属类别分值之和
pub fn total_points(category_points: &[i32]) -> i32 {
    category_points.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_points_mixed() {
        assert_eq!(total_points(&[5, -3, 0, 2]), 4);
    }

    #[test]
    fn test_total_points_empty() {
        assert_eq!(total_points(&[]), 0);
    }
}
