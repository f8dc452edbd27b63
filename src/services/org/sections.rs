use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OrgService, scope_org_query};
use crate::errors::SchoolLmsError;
use crate::models::org::requests::{CreateSectionRequest, OrgListQuery, UpdateSectionRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, policy_context};

/// 创建分班（管理角色；校长只能建在本校班级下）
pub async fn create_section(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateSectionRequest,
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

    // 校长：目标班级必须在本校
    if ctx.role == UserRole::Principal {
        match storage.get_class_by_id(req.class_id).await {
            Ok(Some(class)) if ctx.school_id() == Some(class.school_id) => {}
            Ok(Some(_)) | Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    "班级不存在",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询班级失败: {e}"),
                    ),
                ));
            }
        }
    }

    match storage.create_section(req).await {
        Ok(section) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(section, "创建分班成功")))
        }
        Err(SchoolLmsError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建分班失败: {e}"),
            )),
        ),
    }
}

pub async fn list_sections(
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

    match storage.list_sections(scope_org_query(&ctx, query)).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取分班列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取分班列表失败: {e}"),
            )),
        ),
    }
}

pub async fn update_section(
    service: &OrgService,
    request: &HttpRequest,
    id: i64,
    req: UpdateSectionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_section(id, req).await {
        Ok(Some(section)) => Ok(HttpResponse::Ok().json(ApiResponse::success(section, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "分班不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新分班失败: {e}"),
            )),
        ),
    }
}
