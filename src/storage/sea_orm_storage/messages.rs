//! 站内消息存储操作

use super::SeaOrmStorage;
use super::scope::message_scope_condition;
use crate::entity::message_reads::{
    ActiveModel as ReadActiveModel, Column as ReadColumn, Entity as MessageReads,
};
use crate::entity::message_recipients::{
    ActiveModel as RecipientActiveModel, Column as RecipientColumn, Entity as MessageRecipients,
};
use crate::entity::messages::{ActiveModel, Column, Entity as Messages};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    messages::{
        entities::{Message, MessageRead, MessageType},
        requests::{MessageListQuery, SendMessageRequest},
        responses::{MessageListItem, MessageListResponse},
    },
    notices::entities::NoticePriority,
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ExprTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    async fn message_recipient_ids(&self, message_id: i64) -> Result<Vec<i64>> {
        let rows = MessageRecipients::find()
            .filter(RecipientColumn::MessageId.eq(message_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询收件人失败: {e}")))?;
        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }

    /// 发送消息（消息体与收件人同一事务写入）
    pub async fn send_message_impl(
        &self,
        school_id: i64,
        sender_id: i64,
        req: SendMessageRequest,
    ) -> Result<Message> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            school_id: Set(school_id),
            sender_id: Set(sender_id),
            subject: Set(req.subject),
            content: Set(req.content),
            message_type: Set(req
                .message_type
                .unwrap_or(MessageType::Individual)
                .to_string()),
            priority: Set(req.priority.unwrap_or(NoticePriority::Medium).to_string()),
            sent_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建消息失败: {e}")))?;

        for user_id in &req.recipient_ids {
            let recipient = RecipientActiveModel {
                message_id: Set(result.id),
                user_id: Set(*user_id),
                ..Default::default()
            };
            recipient.insert(&txn).await.map_err(|e| {
                SchoolLmsError::database_operation(format!("写入收件人失败: {e}"))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_message(req.recipient_ids))
    }

    /// 通过 ID 获取消息
    pub async fn get_message_by_id_impl(&self, id: i64) -> Result<Option<Message>> {
        let Some(model) = Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询消息失败: {e}")))?
        else {
            return Ok(None);
        };

        let recipient_ids = self.message_recipient_ids(model.id).await?;
        Ok(Some(model.into_message(recipient_ids)))
    }

    /// 收件箱/发件箱（发送时间倒序，附带当前用户已读状态）
    pub async fn list_messages_impl(
        &self,
        user_id: i64,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = if query.outbox {
            Messages::find().filter(Column::SenderId.eq(user_id))
        } else {
            // 收件箱仍按参与者语义过滤
            Messages::find().filter(message_scope_condition(&Scope::Participant(user_id)))
        };

        if query.unread_only {
            use sea_orm::sea_query::{Expr, Query};
            select = select.filter(
                Column::Id.not_in_subquery(
                    Query::select()
                        .column(ReadColumn::MessageId)
                        .from(MessageReads)
                        .and_where(Expr::col(ReadColumn::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }

        select = select.order_by_desc(Column::SentAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询消息总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询消息页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询消息列表失败: {e}")))?;

        let message_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let read_ids: std::collections::HashSet<i64> = if message_ids.is_empty() {
            Default::default()
        } else {
            MessageReads::find()
                .filter(ReadColumn::MessageId.is_in(message_ids))
                .filter(ReadColumn::UserId.eq(user_id))
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolLmsError::database_operation(format!("查询已读回执失败: {e}"))
                })?
                .into_iter()
                .map(|r| r.message_id)
                .collect()
        };

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let message_id = model.id;
            let recipient_ids = self.message_recipient_ids(message_id).await?;
            items.push(MessageListItem {
                message: model.into_message(recipient_ids),
                is_read: read_ids.contains(&message_id),
            });
        }

        Ok(MessageListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 标记已读（幂等）
    pub async fn mark_message_read_impl(
        &self,
        message_id: i64,
        user_id: i64,
    ) -> Result<MessageRead> {
        let existing = MessageReads::find()
            .filter(ReadColumn::MessageId.eq(message_id))
            .filter(ReadColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询已读回执失败: {e}")))?;

        if let Some(found) = existing {
            return Ok(found.into_message_read());
        }

        let model = ReadActiveModel {
            message_id: Set(message_id),
            user_id: Set(user_id),
            read_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("写入已读回执失败: {e}")))?;

        Ok(result.into_message_read())
    }
}
