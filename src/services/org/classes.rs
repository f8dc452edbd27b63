use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OrgService, scope_org_query};
use crate::errors::SchoolLmsError;
use crate::models::org::requests::{CreateClassRequest, OrgListQuery};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, policy_context};

/// 创建班级（管理角色；校长只能建在本校）
pub async fn create_class(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateClassRequest,
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
            "不能在其他学校创建班级",
        )));
    }

    match storage.create_class(req).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(class, "创建班级成功"))),
        Err(SchoolLmsError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建班级失败: {e}"),
            )),
        ),
    }
}

pub async fn list_classes(
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

    match storage.list_classes(scope_org_query(&ctx, query)).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取班级列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取班级列表失败: {e}"),
            )),
        ),
    }
}
