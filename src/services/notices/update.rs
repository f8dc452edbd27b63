use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use super::list::notice_target;
use crate::models::notices::requests::UpdateNoticeRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

pub async fn update_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
    req: UpdateNoticeRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Notice, Action::Update) {
        return Ok(resp);
    }

    let notice = match storage.get_notice_by_id(notice_id).await {
        Ok(Some(notice)) => notice,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NoticeNotFound,
                "通知不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询通知失败: {e}"),
                )),
            );
        }
    };

    if !scope_for(&ctx, ResourceKind::Notice).matches(&notice_target(&notice)) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "通知不存在",
        )));
    }
    // 教师只能改自己发布的通知
    if ctx.role == UserRole::Teacher && notice.created_by != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有发布者可以修改该通知",
        )));
    }

    match storage.update_notice(notice_id, req).await {
        Ok(Some(notice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(notice, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "通知不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新通知失败: {e}"),
            )),
        ),
    }
}

pub async fn delete_notice(
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Notice, Action::Delete) {
        return Ok(resp);
    }

    let notice = match storage.get_notice_by_id(notice_id).await {
        Ok(Some(notice)) => notice,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NoticeNotFound,
                "通知不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询通知失败: {e}"),
                )),
            );
        }
    };

    if !scope_for(&ctx, ResourceKind::Notice).matches(&notice_target(&notice)) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "通知不存在",
        )));
    }
    if ctx.role == UserRole::Teacher && notice.created_by != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有发布者可以删除该通知",
        )));
    }

    match storage.delete_notice(notice_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NoticeNotFound,
            "通知不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除通知失败: {e}"),
            )),
        ),
    }
}
