use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::OrgService;
use crate::errors::SchoolLmsError;
use crate::models::org::requests::{CreateSchoolRequest, OrgListQuery, UpdateSchoolRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, policy_context};

/// 创建学校（仅开发者，路由层已门禁）
pub async fn create_school(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "学校名称不能为空",
        )));
    }

    match storage.create_school(req).await {
        Ok(school) => Ok(HttpResponse::Created().json(ApiResponse::success(school, "创建学校成功"))),
        Err(SchoolLmsError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建学校失败: {e}"),
            )),
        ),
    }
}

pub async fn list_schools(
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

    // 非开发者只能看到自己所在的学校
    let query = if ctx.role == UserRole::Developer {
        query
    } else {
        OrgListQuery {
            school_id: ctx.school_id(),
            include_inactive: false,
            ..query
        }
    };

    match storage.list_schools(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取学校列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取学校列表失败: {e}"),
            )),
        ),
    }
}

pub async fn get_school(
    service: &OrgService,
    request: &HttpRequest,
    id: i64,
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

    match storage.get_school_by_id(id).await {
        Ok(Some(school)) => {
            // 跨校的学校对非开发者不可见（404，不泄露存在性）
            if ctx.role != UserRole::Developer && ctx.school_id() != Some(school.id) {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SchoolNotFound,
                    "学校不存在",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(school, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "学校不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学校失败: {e}"),
            )),
        ),
    }
}

/// 更新学校（开发者，或本校校长）
pub async fn update_school(
    service: &OrgService,
    request: &HttpRequest,
    id: i64,
    req: UpdateSchoolRequest,
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

    if ctx.role == UserRole::Principal && ctx.school_id() != Some(id) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "学校不存在",
        )));
    }

    match storage.update_school(id, req).await {
        Ok(Some(school)) => Ok(HttpResponse::Ok().json(ApiResponse::success(school, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "学校不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新学校失败: {e}"),
            )),
        ),
    }
}
