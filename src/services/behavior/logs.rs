//! 行为记录
//!
//! 可见性与考勤一致：教师按 本人记录 OR 分管分班，学生本人，
//! 家长子女并集，校长本校。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BehaviorService;
use crate::models::behavior::requests::{BehaviorLogListQuery, CreateBehaviorLogRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

pub async fn list_logs(
    service: &BehaviorService,
    request: &HttpRequest,
    query: BehaviorLogListQuery,
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

    let scope = scope_for(&ctx, ResourceKind::BehaviorLog);
    match storage.list_behavior_logs(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取行为记录成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取行为记录失败: {e}"),
            )),
        ),
    }
}

pub async fn create_log(
    service: &BehaviorService,
    request: &HttpRequest,
    req: CreateBehaviorLogRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::BehaviorLog, Action::Create) {
        return Ok(resp);
    }

    // 引用完整性：学生存在且与类别同校
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

    match storage.get_behavior_category_by_id(req.category_id).await {
        Ok(Some(category)) if category.school_id == student.school_id => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CrossSchoolReference,
                "行为类别与学生不属于同一学校",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "行为类别不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询行为类别失败: {e}"),
                )),
            );
        }
    }

    if let Some(school_id) = ctx.school_id()
        && school_id != student.school_id
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能为其他学校的学生记录行为",
        )));
    }

    match storage
        .create_behavior_log(student.school_id, user.id, req)
        .await
    {
        Ok(log) => Ok(HttpResponse::Created().json(ApiResponse::success(log, "创建行为记录成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建行为记录失败: {e}"),
            )),
        ),
    }
}
