//! 成绩存储操作
//!
//! (student, exam) 的唯一约束由迁移创建；重复录入在这里做
//! 查找后更新的 upsert（last-writer-wins）。

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::scope::mark_scope_condition;
use crate::entity::exams::{Column as ExamColumn, Entity as Exams};
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    academic::{
        entities::{Mark, letter_grade, mark_percentage, round2},
        requests::{MarkListQuery, UpsertMarkRequest},
        responses::{
            MarkListItem, MarkListResponse, StudentPerformanceResponse, SubjectPerformance,
        },
    },
    org::entities::StudentProfile,
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ExprTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 录入成绩（存在则更新）
    pub async fn upsert_mark_impl(
        &self,
        graded_by: i64,
        grade_letter: String,
        req: UpsertMarkRequest,
    ) -> Result<Mark> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Marks::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::ExamId.eq(req.exam_id))
            .one(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩失败: {e}")))?;

        let result = match existing {
            Some(found) => {
                let mut model: ActiveModel = found.into();
                model.marks_obtained = Set(req.marks_obtained);
                model.grade_letter = Set(grade_letter);
                model.remarks = Set(req.remarks);
                model.graded_by = Set(graded_by);
                model.graded_at = Set(now);
                model
                    .update(&txn)
                    .await
                    .map_err(|e| SchoolLmsError::database_operation(format!("更新成绩失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    student_id: Set(req.student_id),
                    exam_id: Set(req.exam_id),
                    marks_obtained: Set(req.marks_obtained),
                    grade_letter: Set(grade_letter),
                    remarks: Set(req.remarks),
                    graded_by: Set(graded_by),
                    graded_at: Set(now),
                    ..Default::default()
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| SchoolLmsError::database_operation(format!("创建成绩失败: {e}")))?
            }
        };

        txn.commit()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_mark())
    }

    /// 通过 ID 获取成绩
    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<Mark>> {
        let result = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_mark()))
    }

    /// 分页列出成绩（按录入时间倒序，附带满分与百分比）
    pub async fn list_marks_impl(
        &self,
        scope: &Scope,
        query: MarkListQuery,
    ) -> Result<MarkListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Marks::find().filter(mark_scope_condition(scope));

        if let Some(exam_id) = query.exam_id {
            select = select.filter(Column::ExamId.eq(exam_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            use sea_orm::sea_query::{Expr, Query};
            select = select.filter(
                Column::ExamId.in_subquery(
                    Query::select()
                        .column(ExamColumn::Id)
                        .from(Exams)
                        .and_where(Expr::col(ExamColumn::SubjectId).eq(subject_id))
                        .to_owned(),
                ),
            );
        }

        select = select.order_by_desc(Column::GradedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let marks: Vec<Mark> = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_mark())
            .collect();

        // 批量取满分，避免逐条查询
        let exam_ids: Vec<i64> = marks
            .iter()
            .map(|m| m.exam_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let mut max_marks_map: HashMap<i64, i32> = HashMap::new();
        if !exam_ids.is_empty() {
            let exams = Exams::find()
                .filter(ExamColumn::Id.is_in(exam_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolLmsError::database_operation(format!("查询考试失败: {e}")))?;
            for exam in exams {
                max_marks_map.insert(exam.id, exam.max_marks);
            }
        }

        let items = marks
            .into_iter()
            .map(|mark| {
                let max_marks = max_marks_map.get(&mark.exam_id).copied().unwrap_or(0);
                let percentage = round2(mark_percentage(mark.marks_obtained, max_marks));
                MarkListItem {
                    mark,
                    max_marks,
                    percentage,
                }
            })
            .collect();

        Ok(MarkListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生成绩汇总：按科目分组，附科目均分与总评
    pub async fn get_student_performance_impl(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentPerformanceResponse> {
        let marks: Vec<Mark> = Marks::find()
            .filter(Column::StudentId.eq(student.id))
            .order_by_desc(Column::GradedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询成绩失败: {e}")))?
            .into_iter()
            .map(|m| m.into_mark())
            .collect();

        let exam_ids: Vec<i64> = marks.iter().map(|m| m.exam_id).collect();

        // (exam_id -> (subject_id, max_marks))
        let mut exam_map: HashMap<i64, (i64, i32)> = HashMap::new();
        if !exam_ids.is_empty() {
            let exams = Exams::find()
                .filter(ExamColumn::Id.is_in(exam_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolLmsError::database_operation(format!("查询考试失败: {e}")))?;
            for exam in exams {
                exam_map.insert(exam.id, (exam.subject_id, exam.max_marks));
            }
        }

        // 按科目聚合
        let mut by_subject: HashMap<i64, Vec<MarkListItem>> = HashMap::new();
        for mark in marks {
            let Some((subject_id, max_marks)) = exam_map.get(&mark.exam_id).copied() else {
                continue;
            };
            let percentage = round2(mark_percentage(mark.marks_obtained, max_marks));
            by_subject.entry(subject_id).or_default().push(MarkListItem {
                mark,
                max_marks,
                percentage,
            });
        }

        let mut subjects = Vec::with_capacity(by_subject.len());
        let mut overall_sum = 0.0;
        let mut overall_count = 0usize;
        for (subject_id, items) in by_subject {
            let subject_name = self
                .get_subject_by_id_impl(subject_id)
                .await?
                .map(|s| s.name)
                .unwrap_or_default();

            let sum: f64 = items.iter().map(|i| i.percentage).sum();
            overall_sum += sum;
            overall_count += items.len();
            let average = if items.is_empty() {
                0.0
            } else {
                round2(sum / items.len() as f64)
            };

            subjects.push(SubjectPerformance {
                subject_id,
                subject_name,
                marks: items,
                average_percentage: average,
            });
        }
        subjects.sort_by_key(|s| s.subject_id);

        let overall_percentage = if overall_count == 0 {
            0.0
        } else {
            round2(overall_sum / overall_count as f64)
        };

        Ok(StudentPerformanceResponse {
            student_id: student.id,
            student_name: student.full_name(),
            subjects,
            overall_percentage,
            overall_grade: letter_grade(overall_percentage).to_string(),
        })
    }
}
