//! 考勤存储操作
//!
//! 批量点名在单个事务内逐条 upsert；事务提交后对受影响的
//! (student, month) 同步重算月度汇总——重算由写入路径显式触发，
//! 不走任何隐式的信号/钩子派发。

use chrono::{Datelike, NaiveDate};

use super::SeaOrmStorage;
use super::scope::{attendance_scope_condition, attendance_summary_scope_condition};
use crate::entity::attendance_records::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::entity::attendance_summaries::{
    ActiveModel as SummaryActiveModel, Column as SummaryColumn, Entity as AttendanceSummaries,
};
use crate::entity::student_profiles;
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus, AttendanceTally, month_bucket},
        requests::{AttendanceListQuery, BulkMarkAttendanceRequest, SummaryListQuery},
        responses::{
            AttendanceListResponse, AttendanceStatisticsResponse, BulkMarkResponse,
            ClassReportResponse, ClassReportRow, SummaryListResponse,
        },
    },
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ExprTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 单条 upsert（事务内）：命中自然键则覆盖，否则新建
    async fn upsert_attendance_in_txn(
        &self,
        txn: &DatabaseTransaction,
        school_id: i64,
        marked_by: i64,
        class_id: i64,
        section_id: i64,
        subject_id: Option<i64>,
        date: NaiveDate,
        student_id: i64,
        status: AttendanceStatus,
        remarks: Option<String>,
    ) -> Result<i64> {
        let now = chrono::Utc::now().timestamp();

        let mut key_cond = Condition::all()
            .add(Column::StudentId.eq(student_id))
            .add(Column::ClassId.eq(class_id))
            .add(Column::Date.eq(date));
        key_cond = match subject_id {
            Some(subject_id) => key_cond.add(Column::SubjectId.eq(subject_id)),
            None => key_cond.add(Column::SubjectId.is_null()),
        };

        let existing = AttendanceRecords::find()
            .filter(key_cond)
            .one(txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤记录失败: {e}")))?;

        let id = match existing {
            Some(found) => {
                let record_id = found.id;
                let mut model: ActiveModel = found.into();
                model.status = Set(status.to_string());
                model.marked_by = Set(marked_by);
                model.remarks = Set(remarks);
                model.updated_at = Set(now);
                model.update(txn).await.map_err(|e| {
                    SchoolLmsError::database_operation(format!("更新考勤记录失败: {e}"))
                })?;
                record_id
            }
            None => {
                let model = ActiveModel {
                    school_id: Set(school_id),
                    student_id: Set(student_id),
                    class_id: Set(class_id),
                    section_id: Set(section_id),
                    subject_id: Set(subject_id),
                    date: Set(date),
                    status: Set(status.to_string()),
                    marked_by: Set(marked_by),
                    remarks: Set(remarks),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let inserted = model.insert(txn).await.map_err(|e| {
                    SchoolLmsError::database_operation(format!("创建考勤记录失败: {e}"))
                })?;
                inserted.id
            }
        };

        Ok(id)
    }

    /// 批量点名
    pub async fn bulk_mark_attendance_impl(
        &self,
        school_id: i64,
        marked_by: i64,
        req: BulkMarkAttendanceRequest,
    ) -> Result<BulkMarkResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("开启事务失败: {e}")))?;

        let mut record_ids = Vec::with_capacity(req.entries.len());
        for entry in &req.entries {
            let id = self
                .upsert_attendance_in_txn(
                    &txn,
                    school_id,
                    marked_by,
                    req.class_id,
                    req.section_id,
                    req.subject_id,
                    req.date,
                    entry.student_id,
                    entry.status,
                    entry.remarks.clone(),
                )
                .await?;
            record_ids.push(id);
        }

        txn.commit()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("提交事务失败: {e}")))?;

        // 写入路径同步重算受影响学生的当月汇总
        for entry in &req.entries {
            self.recompute_attendance_summary_impl(entry.student_id, month_bucket(req.date))
                .await?;
        }

        let mut records = Vec::with_capacity(record_ids.len());
        for id in record_ids {
            if let Some(record) = self.get_attendance_record_by_id_impl(id).await? {
                records.push(record);
            }
        }

        Ok(BulkMarkResponse {
            marked_count: records.len() as i64,
            records,
        })
    }

    /// 重算 (student, month) 的月度汇总
    pub async fn recompute_attendance_summary_impl(
        &self,
        student_id: i64,
        month: NaiveDate,
    ) -> Result<()> {
        let month_start = month_bucket(month);
        let month_end = if month_start.month() == 12 {
            NaiveDate::from_ymd_opt(month_start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(month_start.year(), month_start.month() + 1, 1)
        }
        .unwrap_or(month_start);

        let statuses: Vec<AttendanceStatus> = AttendanceRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.gte(month_start))
            .filter(Column::Date.lt(month_end))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤记录失败: {e}")))?
            .into_iter()
            .map(|m| m.into_attendance_record().status)
            .collect();

        let tally = AttendanceTally::from_statuses(&statuses);
        let now = chrono::Utc::now().timestamp();

        let existing = AttendanceSummaries::find()
            .filter(SummaryColumn::StudentId.eq(student_id))
            .filter(SummaryColumn::Month.eq(month_start))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤汇总失败: {e}")))?;

        match existing {
            Some(found) => {
                let mut model: SummaryActiveModel = found.into();
                model.total_days = Set(tally.total);
                model.present_days = Set(tally.present);
                model.absent_days = Set(tally.absent);
                model.late_days = Set(tally.late);
                model.excused_days = Set(tally.excused);
                model.attendance_percentage = Set(tally.percentage());
                model.updated_at = Set(now);
                model.update(&self.db).await.map_err(|e| {
                    SchoolLmsError::database_operation(format!("更新考勤汇总失败: {e}"))
                })?;
            }
            None => {
                let model = SummaryActiveModel {
                    student_id: Set(student_id),
                    month: Set(month_start),
                    total_days: Set(tally.total),
                    present_days: Set(tally.present),
                    absent_days: Set(tally.absent),
                    late_days: Set(tally.late),
                    excused_days: Set(tally.excused),
                    attendance_percentage: Set(tally.percentage()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model.insert(&self.db).await.map_err(|e| {
                    SchoolLmsError::database_operation(format!("创建考勤汇总失败: {e}"))
                })?;
            }
        }

        Ok(())
    }

    pub async fn get_attendance_record_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let result = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance_record()))
    }

    /// 分页列出考勤记录（日期倒序，再按学生姓名升序）
    pub async fn list_attendance_records_impl(
        &self,
        scope: &Scope,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        use sea_orm::JoinType;
        use sea_orm::QuerySelect;
        use sea_orm::RelationTrait;

        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = AttendanceRecords::find().filter(attendance_scope_condition(scope));

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(section_id) = query.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(date_from) = query.date_from {
            select = select.filter(Column::Date.gte(date_from));
        }
        if let Some(date_to) = query.date_to {
            select = select.filter(Column::Date.lte(date_to));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 次级排序需要学生姓名，join 学生档案
        select = select
            .join(
                JoinType::InnerJoin,
                crate::entity::attendance_records::Relation::Student.def(),
            )
            .order_by_desc(Column::Date)
            .order_by_asc(student_profiles::Column::FirstName)
            .order_by_asc(student_profiles::Column::LastName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询考勤总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询考勤页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_attendance_record())
            .collect();

        Ok(AttendanceListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 考勤统计（在可见范围内按条件计数）
    pub async fn attendance_statistics_impl(
        &self,
        scope: &Scope,
        class_id: Option<i64>,
        student_id: Option<i64>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceStatisticsResponse> {
        let mut base = Condition::all().add(attendance_scope_condition(scope));
        if let Some(class_id) = class_id {
            base = base.add(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = student_id {
            base = base.add(Column::StudentId.eq(student_id));
        }
        if let Some(date_from) = date_from {
            base = base.add(Column::Date.gte(date_from));
        }
        if let Some(date_to) = date_to {
            base = base.add(Column::Date.lte(date_to));
        }

        let count_status = |status: &'static str| {
            let cond = base.clone().add(Column::Status.eq(status));
            async move {
                AttendanceRecords::find()
                    .filter(cond)
                    .count(&self.db)
                    .await
                    .map_err(|e| {
                        SchoolLmsError::database_operation(format!("统计考勤失败: {e}"))
                    })
            }
        };

        let total_records = AttendanceRecords::find()
            .filter(base.clone())
            .count(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("统计考勤失败: {e}")))?;
        let present_count = count_status("present").await?;
        let absent_count = count_status("absent").await?;
        let late_count = count_status("late").await?;
        let excused_count = count_status("excused").await?;

        let attendance_percentage = if total_records > 0 {
            crate::models::academic::entities::round2(
                present_count as f64 / total_records as f64 * 100.0,
            )
        } else {
            0.0
        };

        Ok(AttendanceStatisticsResponse {
            total_records: total_records as i64,
            present_count: present_count as i64,
            absent_count: absent_count as i64,
            late_count: late_count as i64,
            excused_count: excused_count as i64,
            attendance_percentage,
        })
    }

    /// 班级考勤报表：分班内每个学生一行，未点名标记为 not_marked
    pub async fn class_attendance_report_impl(
        &self,
        section_id: i64,
        date: NaiveDate,
        subject_id: Option<i64>,
    ) -> Result<ClassReportResponse> {
        let section = self
            .get_section_by_id_impl(section_id)
            .await?
            .ok_or_else(|| SchoolLmsError::not_found(format!("分班不存在: {section_id}")))?;

        let students = self.list_students_by_section_impl(section_id).await?;

        let mut key_cond = Condition::all()
            .add(Column::SectionId.eq(section_id))
            .add(Column::Date.eq(date));
        key_cond = match subject_id {
            Some(subject_id) => key_cond.add(Column::SubjectId.eq(subject_id)),
            None => key_cond.add(Column::SubjectId.is_null()),
        };

        let records = AttendanceRecords::find()
            .filter(key_cond)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询考勤记录失败: {e}")))?;

        let by_student: std::collections::HashMap<i64, _> = records
            .into_iter()
            .map(|m| (m.student_id, m.into_attendance_record()))
            .collect();

        let rows = students
            .into_iter()
            .map(|student| match by_student.get(&student.id) {
                Some(record) => ClassReportRow {
                    student_id: student.id,
                    student_name: student.full_name(),
                    roll_number: student.roll_number,
                    status: record.status.to_string(),
                    remarks: record.remarks.clone(),
                },
                None => ClassReportRow {
                    student_id: student.id,
                    student_name: student.full_name(),
                    roll_number: student.roll_number,
                    status: "not_marked".to_string(),
                    remarks: None,
                },
            })
            .collect();

        Ok(ClassReportResponse {
            class_id: section.class_id,
            section_id,
            date,
            students: rows,
        })
    }

    /// 分页列出月度汇总（月份倒序）
    pub async fn list_attendance_summaries_impl(
        &self,
        scope: &Scope,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select =
            AttendanceSummaries::find().filter(attendance_summary_scope_condition(scope));

        if let Some(student_id) = query.student_id {
            select = select.filter(SummaryColumn::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            use sea_orm::sea_query::{Expr, Query};
            select = select.filter(
                SummaryColumn::StudentId.in_subquery(
                    Query::select()
                        .column(student_profiles::Column::Id)
                        .from(student_profiles::Entity)
                        .and_where(Expr::col(student_profiles::Column::ClassId).eq(class_id))
                        .to_owned(),
                ),
            );
        }

        select = select.order_by_desc(SummaryColumn::Month);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询考勤汇总总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询考勤汇总页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询考勤汇总列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_attendance_summary())
            .collect();

        Ok(SummaryListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
