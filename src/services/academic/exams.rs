//! 考试操作
//!
//! 可见范围语义：教师按 所教科目 OR 分管分班（与作业的"仅创建者"不同），
//! 学生/家长按 (班级, 分班)，校长本校，开发者全量。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AcademicService;
use crate::models::academic::entities::Exam;
use crate::models::academic::requests::{CreateExamRequest, ExamListQuery, UpdateExamRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, PolicyContext, ResourceKind, ScopeTarget};
use crate::services::{current_user, ensure_can, policy_context, scope_for};
use crate::storage::Storage;

fn exam_target(exam: &Exam) -> ScopeTarget {
    ScopeTarget {
        school_id: Some(exam.school_id),
        class_id: Some(exam.class_id),
        section_id: Some(exam.section_id),
        subject_id: Some(exam.subject_id),
        owner_id: Some(exam.created_by),
        ..Default::default()
    }
}

/// 引用完整性：分班属于班级、科目同校，并返回归属学校
async fn verify_exam_refs(
    storage: &Arc<dyn Storage>,
    ctx: &PolicyContext,
    class_id: i64,
    section_id: i64,
    subject_id: i64,
) -> Result<i64, HttpResponse> {
    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级失败: {e}"),
                )),
            );
        }
    };

    match storage.get_section_by_id(section_id).await {
        Ok(Some(section)) if section.class_id == class_id => {}
        Ok(Some(_)) => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "分班不属于该班级",
            )));
        }
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "分班不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询分班失败: {e}"),
                )),
            );
        }
    }

    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) if subject.school_id == class.school_id => {}
        Ok(Some(_)) => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CrossSchoolReference,
                "科目与班级不属于同一学校",
            )));
        }
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "科目不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询科目失败: {e}"),
                )),
            );
        }
    }

    // 租户不变式：非开发者不能跨校写入
    if let Some(school_id) = ctx.school_id()
        && school_id != class.school_id
    {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能跨学校创建记录",
        )));
    }

    Ok(class.school_id)
}

pub async fn list_exams(
    service: &AcademicService,
    request: &HttpRequest,
    query: ExamListQuery,
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

    let scope = scope_for(&ctx, ResourceKind::Exam);
    match storage.list_exams(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取考试列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取考试列表失败: {e}"),
            )),
        ),
    }
}

pub async fn create_exam(
    service: &AcademicService,
    request: &HttpRequest,
    req: CreateExamRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Exam, Action::Create) {
        return Ok(resp);
    }

    if req.max_marks <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "满分必须为正数",
        )));
    }
    if req.end_time <= req.start_time {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "结束时间必须晚于开始时间",
        )));
    }

    let school_id =
        match verify_exam_refs(&storage, &ctx, req.class_id, req.section_id, req.subject_id).await
        {
            Ok(school_id) => school_id,
            Err(resp) => return Ok(resp),
        };

    match storage.create_exam(school_id, user.id, req).await {
        Ok(exam) => Ok(HttpResponse::Created().json(ApiResponse::success(exam, "创建考试成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建考试失败: {e}"),
            )),
        ),
    }
}

pub async fn get_exam(
    service: &AcademicService,
    request: &HttpRequest,
    exam_id: i64,
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

    match storage.get_exam_by_id(exam_id).await {
        // 范围外与不存在同样返回 404，不泄露存在性
        Ok(Some(exam)) if scope_for(&ctx, ResourceKind::Exam).matches(&exam_target(&exam)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "查询成功")))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询考试失败: {e}"),
            )),
        ),
    }
}

pub async fn update_exam(
    service: &AcademicService,
    request: &HttpRequest,
    exam_id: i64,
    req: UpdateExamRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Exam, Action::Update) {
        return Ok(resp);
    }

    let exam = match storage.get_exam_by_id(exam_id).await {
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

    if !scope_for(&ctx, ResourceKind::Exam).matches(&exam_target(&exam)) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        )));
    }

    // 教师只能改自己创建的考试
    if ctx.role == UserRole::Teacher && exam.created_by != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有创建者可以修改该考试",
        )));
    }

    if let Some(max_marks) = req.max_marks
        && max_marks <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "满分必须为正数",
        )));
    }

    match storage.update_exam(exam_id, req).await {
        Ok(Some(exam)) => Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新考试失败: {e}"),
            )),
        ),
    }
}

pub async fn delete_exam(
    service: &AcademicService,
    request: &HttpRequest,
    exam_id: i64,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Exam, Action::Delete) {
        return Ok(resp);
    }

    let exam = match storage.get_exam_by_id(exam_id).await {
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

    if !scope_for(&ctx, ResourceKind::Exam).matches(&exam_target(&exam)) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        )));
    }
    if ctx.role == UserRole::Teacher && exam.created_by != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有创建者可以删除该考试",
        )));
    }

    match storage.delete_exam(exam_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExamNotFound,
            "考试不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除考试失败: {e}"),
            )),
        ),
    }
}
