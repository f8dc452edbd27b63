//! 成绩操作
//!
//! 录入走 upsert：同一 (student, exam) 重复录入更新原记录，
//! 等第由服务端按百分比推导，客户端提交的等第一律忽略。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicService;
use crate::models::academic::entities::{letter_grade, mark_percentage};
use crate::models::academic::requests::{MarkListQuery, UpsertMarkRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind, ScopeTarget};
use crate::services::{current_user, ensure_can, policy_context, scope_for};
use crate::utils::validate::validate_marks_range;

pub async fn list_marks(
    service: &AcademicService,
    request: &HttpRequest,
    query: MarkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ctx = match policy_context(&storage, &user).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let scope = scope_for(&ctx, ResourceKind::Mark);
    match storage.list_marks(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取成绩列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取成绩列表失败: {e}"),
            )),
        ),
    }
}

/// 录入/更新成绩
pub async fn upsert_mark(
    service: &AcademicService,
    request: &HttpRequest,
    req: UpsertMarkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ctx = match policy_context(&storage, &user).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Mark, Action::Create) {
        return Ok(resp);
    }

    let exam = match storage.get_exam_by_id(req.exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "考试不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考试失败: {e}"),
                )),
            );
        }
    };

    // 教师只能给自己可见（所教科目或分管分班）的考试录成绩
    if ctx.role == UserRole::Teacher {
        let target = ScopeTarget {
            school_id: Some(exam.school_id),
            class_id: Some(exam.class_id),
            section_id: Some(exam.section_id),
            subject_id: Some(exam.subject_id),
            owner_id: Some(exam.created_by),
            ..Default::default()
        };
        if !scope_for(&ctx, ResourceKind::Exam).matches(&target) {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "考试不存在",
            )));
        }
    }

    // 引用完整性：学生必须属于考试所在的班级与分班
    let student = match storage.get_student_profile_by_id(req.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    if student.class_id != exam.class_id || student.section_id != exam.section_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "学生不属于该考试的班级/分班",
        )));
    }

    if let Err(msg) = validate_marks_range(req.marks_obtained, exam.max_marks) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    // 等第由服务端推导
    let percentage = mark_percentage(req.marks_obtained, exam.max_marks);
    let grade = letter_grade(percentage).to_string();

    match storage.upsert_mark(user.id, grade, req).await {
        Ok(mark) => Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "录入成绩成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("录入成绩失败: {e}"),
            )),
        ),
    }
}

/// 学生成绩汇总（按科目分组，附均分与总评）
pub async fn student_performance(
    service: &AcademicService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ctx = match policy_context(&storage, &user).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let student = match storage.get_student_profile_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    // 汇总跨全部科目，按学生归属判定可见性
    let target = ScopeTarget {
        school_id: Some(student.school_id),
        student_id: Some(student.id),
        class_id: Some(student.class_id),
        section_id: Some(student.section_id),
        ..Default::default()
    };
    if !scope_for(&ctx, ResourceKind::Mark).matches(&target) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        )));
    }

    match storage.get_student_performance(&student).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询成绩汇总失败: {e}"),
            )),
        ),
    }
}
