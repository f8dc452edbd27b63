use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知优先级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub enum NoticePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for NoticePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoticePriority::Low => "low",
            NoticePriority::Medium => "medium",
            NoticePriority::High => "high",
            NoticePriority::Urgent => "urgent",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for NoticePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(NoticePriority::Low),
            "medium" => Ok(NoticePriority::Medium),
            "high" => Ok(NoticePriority::High),
            "urgent" => Ok(NoticePriority::Urgent),
            _ => Err(format!("Invalid notice priority: {s}")),
        }
    }
}

// 通知公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct Notice {
    pub id: i64,
    pub school_id: i64,
    pub title: String,
    pub content: String,
    pub priority: NoticePriority,
    /// 目标班级；为空表示全校可见
    pub target_class_ids: Vec<i64>,
    pub attachment_token: Option<String>,
    pub created_by: i64,
    pub is_active: bool,
    pub publish_date: chrono::DateTime<chrono::Utc>,
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notice {
    /// 过期判定：有 expiry_date 且已过
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        matches!(self.expiry_date, Some(expiry) if now > expiry)
    }
}
