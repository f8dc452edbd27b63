//! 作业提交
//!
//! 学生只能以本人身份提交；重复提交原地更新并重新判定迟交
//! （提交时间恰好等于截止时间算按时）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::{CreateSubmissionRequest, SubmissionListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind, RoleLinkage, ScopeTarget};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    query: SubmissionListQuery,
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

    let scope = scope_for(&ctx, ResourceKind::Submission);
    match storage.list_submissions(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取提交列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取提交列表失败: {e}"),
            )),
        ),
    }
}

pub async fn create_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Submission, Action::Create) {
        return Ok(resp);
    }

    // 提交身份取自当前登录学生的档案
    let (profile_id, class_id, section_id) = match &ctx.linkage {
        RoleLinkage::Student {
            profile_id,
            class_id,
            section_id,
            ..
        } => (*profile_id, *class_id, *section_id),
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "缺少学生档案，无法提交作业",
            )));
        }
    };

    // 作业必须属于该学生的班级/分班且对其可见
    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    let target = ScopeTarget {
        school_id: Some(assignment.school_id),
        class_id: Some(assignment.class_id),
        section_id: Some(assignment.section_id),
        ..Default::default()
    };
    if assignment.class_id != class_id
        || assignment.section_id != section_id
        || !scope_for(&ctx, ResourceKind::Assignment).matches(&target)
    {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        )));
    }

    match storage.upsert_submission(profile_id, req).await {
        Ok(submission) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交作业失败: {e}"),
            )),
        ),
    }
}
