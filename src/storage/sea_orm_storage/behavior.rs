//! 行为记录存储操作

use super::SeaOrmStorage;
use super::scope::behavior_log_scope_condition;
use crate::entity::behavior_categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as BehaviorCategories,
};
use crate::entity::behavior_logs::{ActiveModel, Column, Entity as BehaviorLogs};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    behavior::{
        entities::{BehaviorCategory, BehaviorKind, BehaviorLog, total_points},
        requests::{
            BehaviorLogListQuery, CreateBehaviorCategoryRequest, CreateBehaviorLogRequest,
        },
        responses::{BehaviorLogListResponse, BehaviorPointsResponse},
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ExprTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建行为类别
    pub async fn create_behavior_category_impl(
        &self,
        req: CreateBehaviorCategoryRequest,
    ) -> Result<BehaviorCategory> {
        let model = CategoryActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            kind: Set(req.kind.to_string()),
            points: Set(req.points),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建行为类别失败: {e}")))?;

        Ok(result.into_behavior_category())
    }

    pub async fn get_behavior_category_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<BehaviorCategory>> {
        let result = BehaviorCategories::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询行为类别失败: {e}")))?;

        Ok(result.map(|m| m.into_behavior_category()))
    }

    /// 列出行为类别（不分页，量小）
    pub async fn list_behavior_categories_impl(
        &self,
        school_id: Option<i64>,
    ) -> Result<Vec<BehaviorCategory>> {
        let mut select = BehaviorCategories::find()
            .filter(CategoryColumn::IsActive.eq(true));

        if let Some(school_id) = school_id {
            select = select.filter(CategoryColumn::SchoolId.eq(school_id));
        }

        let models = select
            .order_by_asc(CategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询行为类别失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_behavior_category()).collect())
    }

    /// 创建行为记录
    pub async fn create_behavior_log_impl(
        &self,
        school_id: i64,
        reported_by: i64,
        req: CreateBehaviorLogRequest,
    ) -> Result<BehaviorLog> {
        let model = ActiveModel {
            school_id: Set(school_id),
            student_id: Set(req.student_id),
            category_id: Set(req.category_id),
            title: Set(req.title),
            description: Set(req.description),
            date_recorded: Set(req.date_recorded),
            reported_by: Set(reported_by),
            action_taken: Set(req.action_taken),
            parent_notified: Set(req.parent_notified),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建行为记录失败: {e}")))?;

        Ok(result.into_behavior_log())
    }

    pub async fn get_behavior_log_by_id_impl(&self, id: i64) -> Result<Option<BehaviorLog>> {
        let result = BehaviorLogs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询行为记录失败: {e}")))?;

        Ok(result.map(|m| m.into_behavior_log()))
    }

    /// 分页列出行为记录（记录日期倒序）
    pub async fn list_behavior_logs_impl(
        &self,
        scope: &Scope,
        query: BehaviorLogListQuery,
    ) -> Result<BehaviorLogListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = BehaviorLogs::find().filter(behavior_log_scope_condition(scope));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(Column::CategoryId.eq(category_id));
        }
        if let Some(kind) = query.kind {
            use sea_orm::sea_query::{Expr, Query};
            select = select.filter(
                Column::CategoryId.in_subquery(
                    Query::select()
                        .column(CategoryColumn::Id)
                        .from(BehaviorCategories)
                        .and_where(Expr::col(CategoryColumn::Kind).eq(kind.to_string()))
                        .to_owned(),
                ),
            );
        }
        if let Some(date_from) = query.date_from {
            select = select.filter(Column::DateRecorded.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::DateRecorded.lte(date_to));
        }

        select = select.order_by_desc(Column::DateRecorded);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询行为记录总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询行为记录页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询行为记录列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_behavior_log())
            .collect();

        Ok(BehaviorLogListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生行为分汇总：各记录所属类别分值之和
    pub async fn student_behavior_points_impl(
        &self,
        student_id: i64,
    ) -> Result<BehaviorPointsResponse> {
        let logs = BehaviorLogs::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询行为记录失败: {e}")))?;

        let category_ids: Vec<i64> = logs
            .iter()
            .map(|l| l.category_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let mut category_map: std::collections::HashMap<i64, BehaviorCategory> =
            std::collections::HashMap::new();
        if !category_ids.is_empty() {
            let categories = BehaviorCategories::find()
                .filter(CategoryColumn::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolLmsError::database_operation(format!("查询行为类别失败: {e}"))
                })?;
            for category in categories {
                let category = category.into_behavior_category();
                category_map.insert(category.id, category);
            }
        }

        let mut points = Vec::with_capacity(logs.len());
        let mut positive_count = 0i64;
        let mut negative_count = 0i64;
        let mut neutral_count = 0i64;
        for log in &logs {
            let Some(category) = category_map.get(&log.category_id) else {
                continue;
            };
            points.push(category.points);
            match category.kind {
                BehaviorKind::Positive => positive_count += 1,
                BehaviorKind::Negative => negative_count += 1,
                BehaviorKind::Neutral => neutral_count += 1,
            }
        }

        Ok(BehaviorPointsResponse {
            student_id,
            total_points: total_points(&points),
            positive_count,
            negative_count,
            neutral_count,
        })
    }
}
