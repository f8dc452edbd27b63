use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::fees::requests::{CreateFeeStructureRequest, FeeStructureListQuery};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};
use crate::utils::validate::validate_academic_year;

/// 创建收费标准（校级管理角色）
pub async fn create_structure(
    service: &FeeService,
    request: &HttpRequest,
    req: CreateFeeStructureRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeStructure, Action::Create) {
        return Ok(resp);
    }

    if let Err(msg) = validate_academic_year(&req.academic_year) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if ctx.role == UserRole::Principal && ctx.school_id() != Some(req.school_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能在其他学校创建收费标准",
        )));
    }

    match storage.create_fee_structure(req).await {
        Ok(structure) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(structure, "创建收费标准成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建收费标准失败: {e}"),
            )),
        ),
    }
}

pub async fn list_structures(
    service: &FeeService,
    request: &HttpRequest,
    mut query: FeeStructureListQuery,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeStructure, Action::Read) {
        return Ok(resp);
    }

    // 非开发者限定本校
    if ctx.role != UserRole::Developer {
        query.school_id = ctx.school_id();
    }

    match storage.list_fee_structures(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取收费标准成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取收费标准失败: {e}"),
            )),
        ),
    }
}
