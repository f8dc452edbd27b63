//! 课程表存储操作
//!
//! 与考勤不同，课程表冲突不做 upsert：同一 (班级, 分班, 周几, 开始时间)
//! 已有条目时直接报 Conflict。

use super::SeaOrmStorage;
use super::scope::timetable_scope_condition;
use crate::entity::timetable_slots::{ActiveModel, Column, Entity as TimetableSlots};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    academic::{
        entities::TimetableSlot,
        requests::{CreateTimetableSlotRequest, TimetableListQuery},
        responses::TimetableListResponse,
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程表条目
    pub async fn create_timetable_slot_impl(
        &self,
        school_id: i64,
        req: CreateTimetableSlotRequest,
    ) -> Result<TimetableSlot> {
        let existing = TimetableSlots::find()
            .filter(Column::ClassId.eq(req.class_id))
            .filter(Column::SectionId.eq(req.section_id))
            .filter(Column::Weekday.eq(req.weekday.to_string()))
            .filter(Column::StartTime.eq(req.start_time))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询课程表失败: {e}")))?;

        if existing.is_some() {
            return Err(SchoolLmsError::conflict(format!(
                "该时段已有课程: {} {}",
                req.weekday, req.start_time
            )));
        }

        let model = ActiveModel {
            school_id: Set(school_id),
            class_id: Set(req.class_id),
            section_id: Set(req.section_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            weekday: Set(req.weekday.to_string()),
            weekday_order: Set(req.weekday.order()),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建课程表失败: {e}")))?;

        Ok(result.into_timetable_slot())
    }

    pub async fn get_timetable_slot_by_id_impl(&self, id: i64) -> Result<Option<TimetableSlot>> {
        let result = TimetableSlots::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询课程表失败: {e}")))?;

        Ok(result.map(|m| m.into_timetable_slot()))
    }

    /// 分页列出课程表（周几升序，再按开始时间升序）
    pub async fn list_timetable_slots_impl(
        &self,
        scope: &Scope,
        query: TimetableListQuery,
    ) -> Result<TimetableListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(50).clamp(1, 200) as u64;

        let mut select = TimetableSlots::find().filter(timetable_scope_condition(scope));

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(section_id) = query.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(weekday) = query.weekday {
            select = select.filter(Column::Weekday.eq(weekday.to_string()));
        }

        select = select
            .order_by_asc(Column::WeekdayOrder)
            .order_by_asc(Column::StartTime);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询课程表总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询课程表页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询课程表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_timetable_slot())
            .collect();

        Ok(TimetableListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除课程表条目
    pub async fn delete_timetable_slot_impl(&self, id: i64) -> Result<bool> {
        let result = TimetableSlots::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("删除课程表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
