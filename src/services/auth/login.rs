use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::config::AppConfig;
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

/// 处理用户登录（用户名或邮箱）
pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    req: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_username_or_email(&req.identifier).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // 账号不存在与密码错误返回同一提示，不泄露存在性
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "用户名或密码错误",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    if !verify_password(&req.password, &user.password_hash) {
        info!("Login failed for identifier: {}", req.identifier);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "用户名或密码错误",
        )));
    }

    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "账号已停用",
        )));
    }

    // remember_me 使用更长的 refresh token 有效期
    let config = AppConfig::get();
    let refresh_expiry = if req.remember_me {
        Some(chrono::TimeDelta::days(
            config.jwt.refresh_token_remember_me_expiry,
        ))
    } else {
        None
    };

    let token_pair = match user.generate_token_pair(refresh_expiry).await {
        Ok(pair) => pair,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("生成令牌失败: {e}"),
                )),
            );
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        info!("Failed to update last login for user {}: {}", user.id, e);
    }

    let cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(
        LoginResponse {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            user,
        },
        "登录成功",
    )))
}
