//! 通知查询
//!
//! 默认隐藏已停用与已过期的通知；include_inactive 只对管理角色生效。
//! 学生/家长的受众过滤（全校通知 OR 目标班级命中）由范围谓词表达。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::notices::entities::Notice;
use crate::models::notices::requests::NoticeListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{ResourceKind, ScopeTarget};
use crate::services::{current_user, policy_context, scope_for};

pub(super) fn notice_target(notice: &Notice) -> ScopeTarget {
    ScopeTarget {
        school_id: Some(notice.school_id),
        owner_id: Some(notice.created_by),
        target_class_ids: notice.target_class_ids.clone(),
        ..Default::default()
    }
}

pub async fn list_notices(
    service: &NoticeService,
    request: &HttpRequest,
    mut query: NoticeListQuery,
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

    // 软停用/过期的通知只有管理角色可显式拉取
    if !matches!(ctx.role, UserRole::Developer | UserRole::Principal) {
        query.include_inactive = false;
    }

    let scope = scope_for(&ctx, ResourceKind::Notice);
    match storage.list_notices(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取通知列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取通知列表失败: {e}"),
            )),
        ),
    }
}

pub async fn get_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
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

    match storage.get_notice_by_id(notice_id).await {
        Ok(Some(notice))
            if scope_for(&ctx, ResourceKind::Notice).matches(&notice_target(&notice)) =>
        {
            Ok(HttpResponse::Ok().json(ApiResponse::success(notice, "查询成功")))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "通知不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询通知失败: {e}"),
            )),
        ),
    }
}
