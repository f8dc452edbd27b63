use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Scope, ScopeTarget};
use crate::services::current_user;

/// 标记消息已读（幂等：重复标记返回原回执）
pub async fn mark_read(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 只有参与者能标记已读；范围外与不存在同样 404
    let message = match storage.get_message_by_id(message_id).await {
        Ok(Some(message)) => message,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MessageNotFound,
                "消息不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询消息失败: {e}"),
                )),
            );
        }
    };

    let mut participant_ids = message.recipient_ids.clone();
    participant_ids.push(message.sender_id);
    let target = ScopeTarget {
        school_id: Some(message.school_id),
        participant_ids,
        ..Default::default()
    };
    if !Scope::Participant(user.id).matches(&target) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MessageNotFound,
            "消息不存在",
        )));
    }

    match storage.mark_message_read(message_id, user.id).await {
        Ok(read) => Ok(HttpResponse::Ok().json(ApiResponse::success(read, "已标记为已读"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("标记已读失败: {e}"),
            )),
        ),
    }
}
