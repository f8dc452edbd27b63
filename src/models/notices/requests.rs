use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::notices::entities::NoticePriority;

/// 发布通知请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct CreateNoticeRequest {
    pub title: String,
    pub content: String,
    pub priority: Option<NoticePriority>,
    /// 为空表示全校通知
    #[serde(default)]
    pub target_class_ids: Vec<i64>,
    pub attachment_token: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
}

/// 更新通知请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub priority: Option<NoticePriority>,
    pub target_class_ids: Option<Vec<i64>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// 通知列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct NoticeListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub priority: Option<NoticePriority>,
    /// 管理角色可显式包含已过期/已停用的通知
    pub include_inactive: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct NoticeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub priority: Option<NoticePriority>,
    pub include_inactive: bool,
}

impl From<NoticeListParams> for NoticeListQuery {
    fn from(params: NoticeListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            priority: params.priority,
            include_inactive: params.include_inactive.unwrap_or(false),
        }
    }
}
