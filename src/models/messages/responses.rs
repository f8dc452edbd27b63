use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::messages::entities::Message;

/// 消息条目（附带当前用户已读状态）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub message: Message,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageListResponse {
    pub items: Vec<MessageListItem>,
    pub pagination: PaginationInfo,
}
