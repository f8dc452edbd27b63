//! 作业提交存储操作
//!
//! (assignment, student) 唯一；重复提交原地更新并重新判定迟交。
//! 统计与进度报表也在这里：未提交的学生以占位行出现，不被省略。

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::scope::submission_scope_condition;
use crate::entity::assignment_submissions::{
    ActiveModel, Column, Entity as AssignmentSubmissions,
};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::student_profiles;
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    academic::entities::round2,
    assignments::{
        entities::{AssignmentSubmission, SubmissionStatus, is_late},
        requests::{CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListQuery},
        responses::{
            AssignmentStatsResponse, StudentProgressResponse, StudentProgressRow,
            SubmissionListResponse,
        },
    },
    org::entities::StudentProfile,
};
use crate::policy::Scope;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生提交作业（存在则原地更新）
    pub async fn upsert_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<AssignmentSubmission> {
        let assignment = self
            .get_assignment_by_id_impl(req.assignment_id)
            .await?
            .ok_or_else(|| {
                SchoolLmsError::not_found(format!("作业不存在: {}", req.assignment_id))
            })?;

        let submitted_at = chrono::Utc::now();
        // 恰好等于截止时间算按时，严格晚于才算迟交
        let status = if is_late(submitted_at, assignment.due_date) {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = AssignmentSubmissions::find()
            .filter(Column::AssignmentId.eq(req.assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交失败: {e}")))?;

        let result = match existing {
            Some(found) => {
                let mut model: ActiveModel = found.into();
                model.submission_text = Set(req.submission_text);
                model.attachment_token = Set(req.attachment_token);
                model.submitted_at = Set(submitted_at.timestamp());
                model.status = Set(status.to_string());
                // 重新提交清空既有评分
                model.marks_obtained = Set(None);
                model.teacher_feedback = Set(None);
                model.graded_by = Set(None);
                model.graded_at = Set(None);
                model
                    .update(&txn)
                    .await
                    .map_err(|e| SchoolLmsError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    assignment_id: Set(req.assignment_id),
                    student_id: Set(student_id),
                    submission_text: Set(req.submission_text),
                    attachment_token: Set(req.attachment_token),
                    submitted_at: Set(submitted_at.timestamp()),
                    status: Set(status.to_string()),
                    ..Default::default()
                };
                model
                    .insert(&txn)
                    .await
                    .map_err(|e| SchoolLmsError::database_operation(format!("创建提交失败: {e}")))?
            }
        };

        txn.commit()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        let result = AssignmentSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交（提交时间倒序）
    pub async fn list_submissions_impl(
        &self,
        scope: &Scope,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = AssignmentSubmissions::find().filter(submission_scope_condition(scope));

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_submission())
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批改提交
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        graded_by: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<AssignmentSubmission>> {
        let Some(existing) = AssignmentSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.marks_obtained = Set(Some(req.marks_obtained));
        model.teacher_feedback = Set(req.teacher_feedback);
        model.graded_by = Set(Some(graded_by));
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));
        model.status = Set(SubmissionStatus::Graded.to_string());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("批改提交失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 作业统计：提交率、批改率、平均分
    pub async fn assignment_statistics_impl(
        &self,
        assignment_id: i64,
    ) -> Result<AssignmentStatsResponse> {
        let assignment = self
            .get_assignment_by_id_impl(assignment_id)
            .await?
            .ok_or_else(|| SchoolLmsError::not_found(format!("作业不存在: {assignment_id}")))?;

        let total_students = student_profiles::Entity::find()
            .filter(student_profiles::Column::SectionId.eq(assignment.section_id))
            .filter(student_profiles::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("统计学生数失败: {e}")))?
            as i64;

        let submissions: Vec<AssignmentSubmission> = AssignmentSubmissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询提交失败: {e}")))?
            .into_iter()
            .map(|m| m.into_submission())
            .collect();

        let submitted_count = submissions.len() as i64;
        let graded_count = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .count() as i64;
        let late_count = submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Late)
            .count() as i64;

        let graded_marks: Vec<f64> = submissions
            .iter()
            .filter_map(|s| s.marks_obtained)
            .collect();
        let average_marks = if graded_marks.is_empty() {
            None
        } else {
            Some(round2(
                graded_marks.iter().sum::<f64>() / graded_marks.len() as f64,
            ))
        };

        let submission_percentage = if total_students > 0 {
            round2(submitted_count as f64 / total_students as f64 * 100.0)
        } else {
            0.0
        };
        let grading_percentage = if submitted_count > 0 {
            round2(graded_count as f64 / submitted_count as f64 * 100.0)
        } else {
            0.0
        };

        Ok(AssignmentStatsResponse {
            assignment_id,
            assignment_title: assignment.title,
            total_students,
            submitted_count,
            graded_count,
            late_count,
            submission_percentage,
            grading_percentage,
            average_marks,
        })
    }

    /// 学生作业进度：覆盖其分班的全部已布置作业，未提交以 submitted=false 占位
    pub async fn student_assignment_progress_impl(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentProgressResponse> {
        let assignments = Assignments::find()
            .filter(AssignmentColumn::ClassId.eq(student.class_id))
            .filter(AssignmentColumn::SectionId.eq(student.section_id))
            .filter(AssignmentColumn::Status.ne("draft"))
            .order_by_desc(AssignmentColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询作业失败: {e}")))?;

        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        let mut submission_map: HashMap<i64, AssignmentSubmission> = HashMap::new();
        if !assignment_ids.is_empty() {
            let submissions = AssignmentSubmissions::find()
                .filter(Column::AssignmentId.is_in(assignment_ids))
                .filter(Column::StudentId.eq(student.id))
                .all(&self.db)
                .await
                .map_err(|e| SchoolLmsError::database_operation(format!("查询提交失败: {e}")))?;
            for submission in submissions {
                let submission = submission.into_submission();
                submission_map.insert(submission.assignment_id, submission);
            }
        }

        let rows = assignments
            .into_iter()
            .map(|model| {
                let assignment = model.into_assignment();
                match submission_map.remove(&assignment.id) {
                    Some(submission) => StudentProgressRow {
                        assignment_id: assignment.id,
                        assignment_title: assignment.title,
                        due_date: assignment.due_date,
                        max_marks: assignment.max_marks,
                        submitted: true,
                        submission_status: Some(submission.status),
                        marks_obtained: submission.marks_obtained,
                        submitted_at: Some(submission.submitted_at),
                        is_late: is_late(submission.submitted_at, assignment.due_date),
                        grade_percentage: submission.grade_percentage(assignment.max_marks),
                    },
                    None => StudentProgressRow {
                        assignment_id: assignment.id,
                        assignment_title: assignment.title,
                        due_date: assignment.due_date,
                        max_marks: assignment.max_marks,
                        submitted: false,
                        submission_status: None,
                        marks_obtained: None,
                        submitted_at: None,
                        is_late: false,
                        grade_percentage: None,
                    },
                }
            })
            .collect();

        Ok(StudentProgressResponse {
            student_id: student.id,
            student_name: student.full_name(),
            assignments: rows,
        })
    }
}
