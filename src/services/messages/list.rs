use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::messages::requests::MessageListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

/// 收件箱/发件箱（参与者语义：发件人或收件人，任何角色都一样）
pub async fn list_messages(
    service: &MessageService,
    request: &HttpRequest,
    query: MessageListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    match storage.list_messages(user.id, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取消息列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取消息列表失败: {e}"),
            )),
        ),
    }
}
