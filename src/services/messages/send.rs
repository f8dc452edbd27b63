use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::messages::entities::MessageType;
use crate::models::messages::requests::SendMessageRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};

/// 发送站内消息
///
/// 所有角色都可以发个人消息；broadcast/announcement 仅限教学人员。
pub async fn send_message(
    service: &MessageService,
    request: &HttpRequest,
    req: SendMessageRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Message, Action::Create) {
        return Ok(resp);
    }

    let message_type = req.message_type.unwrap_or(MessageType::Individual);
    if matches!(
        message_type,
        MessageType::Broadcast | MessageType::Announcement
    ) && !matches!(
        ctx.role,
        UserRole::Teacher | UserRole::Principal | UserRole::Developer
    ) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有教学人员可以发送广播消息",
        )));
    }

    if message_type == MessageType::Individual && req.recipient_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "收件人不能为空",
        )));
    }

    let Some(school_id) = ctx.school_id() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "开发者账号没有学校归属，无法发送站内消息",
        )));
    };

    match storage.send_message(school_id, user.id, req).await {
        Ok(message) => Ok(HttpResponse::Created().json(ApiResponse::success(message, "发送成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("发送消息失败: {e}"),
            )),
        ),
    }
}
