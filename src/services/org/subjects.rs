use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OrgService, scope_org_query};
use crate::errors::SchoolLmsError;
use crate::models::org::requests::{CreateSubjectRequest, OrgListQuery};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, policy_context};

/// 创建科目（管理角色；校长只能建在本校）
pub async fn create_subject(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateSubjectRequest,
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

    if ctx.role == UserRole::Principal && ctx.school_id() != Some(req.school_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能在其他学校创建科目",
        )));
    }

    if req.code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "科目代码不能为空",
        )));
    }

    match storage.create_subject(req).await {
        Ok(subject) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(subject, "创建科目成功")))
        }
        Err(SchoolLmsError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建科目失败: {e}"),
            )),
        ),
    }
}

pub async fn list_subjects(
    service: &OrgService,
    request: &HttpRequest,
    query: OrgListQuery,
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

    match storage.list_subjects(scope_org_query(&ctx, query)).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取科目列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取科目列表失败: {e}"),
            )),
        ),
    }
}
