//! 通知存储操作

use super::SeaOrmStorage;
use super::scope::notice_scope_condition;
use crate::entity::notice_classes::{
    ActiveModel as NoticeClassActiveModel, Column as NoticeClassColumn, Entity as NoticeClasses,
};
use crate::entity::notices::{ActiveModel, Column, Entity as Notices};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    notices::{
        entities::{Notice, NoticePriority},
        requests::{CreateNoticeRequest, NoticeListQuery, UpdateNoticeRequest},
        responses::NoticeListResponse,
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    async fn notice_target_class_ids(&self, notice_id: i64) -> Result<Vec<i64>> {
        let rows = NoticeClasses::find()
            .filter(NoticeClassColumn::NoticeId.eq(notice_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询通知班级失败: {e}")))?;
        Ok(rows.into_iter().map(|r| r.class_id).collect())
    }

    async fn replace_notice_classes(&self, notice_id: i64, class_ids: &[i64]) -> Result<()> {
        NoticeClasses::delete_many()
            .filter(NoticeClassColumn::NoticeId.eq(notice_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("清理通知班级失败: {e}")))?;

        for class_id in class_ids {
            let model = NoticeClassActiveModel {
                notice_id: Set(notice_id),
                class_id: Set(*class_id),
                ..Default::default()
            };
            model.insert(&self.db).await.map_err(|e| {
                SchoolLmsError::database_operation(format!("写入通知班级失败: {e}"))
            })?;
        }
        Ok(())
    }

    /// 发布通知（target_class_ids 为空表示全校）
    pub async fn create_notice_impl(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateNoticeRequest,
    ) -> Result<Notice> {
        let now = chrono::Utc::now();

        let model = ActiveModel {
            school_id: Set(school_id),
            title: Set(req.title),
            content: Set(req.content),
            priority: Set(req.priority.unwrap_or(NoticePriority::Medium).to_string()),
            attachment_token: Set(req.attachment_token),
            created_by: Set(created_by),
            is_active: Set(true),
            publish_date: Set(req
                .publish_date
                .map(|dt| dt.timestamp())
                .unwrap_or(now.timestamp())),
            expiry_date: Set(req.expiry_date.map(|dt| dt.timestamp())),
            created_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建通知失败: {e}")))?;

        self.replace_notice_classes(result.id, &req.target_class_ids)
            .await?;

        Ok(result.into_notice(req.target_class_ids))
    }

    /// 通过 ID 获取通知
    pub async fn get_notice_by_id_impl(&self, id: i64) -> Result<Option<Notice>> {
        let Some(model) = Notices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询通知失败: {e}")))?
        else {
            return Ok(None);
        };

        let target_class_ids = self.notice_target_class_ids(model.id).await?;
        Ok(Some(model.into_notice(target_class_ids)))
    }

    /// 分页列出通知（发布时间倒序）
    ///
    /// 默认隐藏已停用与已过期的通知；include_inactive 仅对管理角色开放，
    /// 由服务层把关。
    pub async fn list_notices_impl(
        &self,
        scope: &Scope,
        query: NoticeListQuery,
    ) -> Result<NoticeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Notices::find().filter(notice_scope_condition(scope));

        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.to_string()));
        }

        if !query.include_inactive {
            let now = chrono::Utc::now().timestamp();
            select = select.filter(Column::IsActive.eq(true)).filter(
                Condition::any()
                    .add(Column::ExpiryDate.is_null())
                    .add(Column::ExpiryDate.gte(now)),
            );
        }

        select = select.order_by_desc(Column::PublishDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询通知页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询通知列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let target_class_ids = self.notice_target_class_ids(model.id).await?;
            items.push(model.into_notice(target_class_ids));
        }

        Ok(NoticeListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新通知
    pub async fn update_notice_impl(
        &self,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<Notice>> {
        let existing = self.get_notice_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(priority) = update.priority {
            model.priority = Set(priority.to_string());
        }
        if let Some(expiry_date) = update.expiry_date {
            model.expiry_date = Set(Some(expiry_date.timestamp()));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新通知失败: {e}")))?;

        if let Some(class_ids) = update.target_class_ids {
            self.replace_notice_classes(id, &class_ids).await?;
        }

        self.get_notice_by_id_impl(id).await
    }

    /// 删除通知
    pub async fn delete_notice_impl(&self, id: i64) -> Result<bool> {
        NoticeClasses::delete_many()
            .filter(NoticeClassColumn::NoticeId.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("清理通知班级失败: {e}")))?;

        let result = Notices::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
