use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::messages::requests::{MessageListParams, SendMessageRequest};
use crate::services::MessageService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MessageService 实例
static MESSAGE_SERVICE: Lazy<MessageService> = Lazy::new(MessageService::new_lazy);

// 发送消息
pub async fn send_message(
    req: HttpRequest,
    body: web::Json<SendMessageRequest>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.send_message(&req, body.into_inner()).await
}

// 收件箱/发件箱
pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<MessageListParams>,
) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE
        .list_messages(&req, query.into_inner().into())
        .await
}

// 标记已读（幂等）
pub async fn mark_read(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MESSAGE_SERVICE.mark_read(&req, path.0).await
}

// 配置路由
pub fn configure_messages_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/messages")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_messages))
                    .route(web::post().to(send_message)),
            )
            .service(web::resource("/{id}/read").route(web::post().to(mark_read))),
    );
}
