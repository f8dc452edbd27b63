use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BehaviorService;
use crate::models::behavior::requests::CreateBehaviorCategoryRequest;
use crate::models::behavior::responses::BehaviorCategoryListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};

pub async fn list_categories(
    service: &BehaviorService,
    request: &HttpRequest,
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

    // 开发者看全量，其余角色限定本校
    let school_id = match ctx.role {
        UserRole::Developer => None,
        _ => ctx.school_id(),
    };

    match storage.list_behavior_categories(school_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BehaviorCategoryListResponse { items },
            "获取行为类别成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取行为类别失败: {e}"),
            )),
        ),
    }
}

/// 创建行为类别（校级管理角色）
pub async fn create_category(
    service: &BehaviorService,
    request: &HttpRequest,
    req: CreateBehaviorCategoryRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::BehaviorCategory, Action::Create) {
        return Ok(resp);
    }
    if ctx.role == UserRole::Principal && ctx.school_id() != Some(req.school_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能在其他学校创建行为类别",
        )));
    }

    match storage.create_behavior_category(req).await {
        Ok(category) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(category, "创建行为类别成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建行为类别失败: {e}"),
            )),
        ),
    }
}
