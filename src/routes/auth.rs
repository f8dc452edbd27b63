use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, UpdateProfileRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// 用户登录
pub async fn login(req: HttpRequest, body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, body.into_inner()).await
}

// 刷新令牌（请求体可省略，回退到 cookie）
pub async fn refresh_token(
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .refresh_token(&req, body.map(|b| b.into_inner()))
        .await
}

// 用户登出
pub async fn logout(_req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

// 获取个人资料
pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_profile(&req).await
}

// 更新个人资料
pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .route(web::post().to(login))
                    .wrap(RateLimit::login()),
            )
            .service(
                web::resource("/refresh")
                    .route(web::post().to(refresh_token))
                    .wrap(RateLimit::refresh_token()),
            )
            .service(web::resource("/logout").route(web::post().to(logout)))
            .service(
                web::scope("/profile")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("")
                            .route(web::get().to(get_profile))
                            .route(web::put().to(update_profile)),
                    ),
            ),
    );
}
