use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::notices::entities::NoticePriority;

// 消息类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub enum MessageType {
    Individual,
    Group,
    Broadcast,
    Announcement,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MessageType::Individual => "individual",
            MessageType::Group => "group",
            MessageType::Broadcast => "broadcast",
            MessageType::Announcement => "announcement",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(MessageType::Individual),
            "group" => Ok(MessageType::Group),
            "broadcast" => Ok(MessageType::Broadcast),
            "announcement" => Ok(MessageType::Announcement),
            _ => Err(format!("Invalid message type: {s}")),
        }
    }
}

// 站内消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct Message {
    pub id: i64,
    pub school_id: i64,
    pub sender_id: i64,
    pub recipient_ids: Vec<i64>,
    pub subject: String,
    pub content: String,
    pub message_type: MessageType,
    pub priority: NoticePriority,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

// 已读回执
//
// (message, user) 唯一；重复标记已读是幂等的。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageRead {
    pub id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub read_at: chrono::DateTime<chrono::Utc>,
}
