//! 考试存储操作

use super::SeaOrmStorage;
use super::scope::exam_scope_condition;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    academic::{
        entities::Exam,
        requests::{CreateExamRequest, ExamListQuery, UpdateExamRequest},
        responses::ExamListResponse,
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建考试（引用完整性由调用方的服务层校验）
    pub async fn create_exam_impl(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateExamRequest,
    ) -> Result<Exam> {
        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            exam_type: Set(req.exam_type.to_string()),
            class_id: Set(req.class_id),
            section_id: Set(req.section_id),
            subject_id: Set(req.subject_id),
            date: Set(req.date),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            max_marks: Set(req.max_marks),
            created_by: Set(created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 通过 ID 获取考试
    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 分页列出考试（可见范围 + 显式筛选合取，按日期倒序）
    pub async fn list_exams_impl(
        &self,
        scope: &Scope,
        query: ExamListQuery,
    ) -> Result<ExamListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Exams::find().filter(exam_scope_condition(scope));

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(section_id) = query.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(exam_type) = query.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type.to_string()));
        }
        if let Some(date_from) = query.date_from {
            select = select.filter(Column::Date.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::Date.lte(date_to));
        }

        select = select.order_by_desc(Column::Date);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考试总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考试页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考试列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_exam())
            .collect();

        Ok(ExamListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新考试
    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let existing = self.get_exam_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(exam_type) = update.exam_type {
            model.exam_type = Set(exam_type.to_string());
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(max_marks);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新考试失败: {e}")))?;

        self.get_exam_by_id_impl(id).await
    }

    /// 删除考试
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
