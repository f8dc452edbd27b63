use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::messages::entities::MessageType;
use crate::models::notices::entities::NoticePriority;

/// 发送消息请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct SendMessageRequest {
    /// broadcast/announcement 类型可为空（按学校广播）
    #[serde(default)]
    pub recipient_ids: Vec<i64>,
    pub subject: String,
    pub content: String,
    pub message_type: Option<MessageType>,
    pub priority: Option<NoticePriority>,
}

/// 消息列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct MessageListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// inbox（默认）或 outbox
    pub mailbox: Option<String>,
    pub unread_only: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct MessageListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub outbox: bool,
    pub unread_only: bool,
}

impl From<MessageListParams> for MessageListQuery {
    fn from(params: MessageListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            outbox: params.mailbox.as_deref() == Some("outbox"),
            unread_only: params.unread_only.unwrap_or(false),
        }
    }
}
