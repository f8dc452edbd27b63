use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::auth::requests::RefreshTokenRequest;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

/// 刷新访问令牌
///
/// refresh token 优先取请求体，其次取 cookie。
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
    req: Option<RefreshTokenRequest>,
) -> ActixResult<HttpResponse> {
    let refresh_token = req
        .map(|r| r.refresh_token)
        .or_else(|| JwtUtils::extract_refresh_token_from_cookie(request));

    let Some(refresh_token) = refresh_token else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "缺少 refresh token",
        )));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenExpired,
                "refresh token 无效或已过期",
            )));
        }
    };

    // 确认用户仍然有效
    let storage = service.get_storage(request);
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => {}
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "账号不可用",
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
    }

    let access_token = match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(token) => token,
        Err(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenExpired,
                "refresh token 无效或已过期",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshTokenResponse {
            access_token,
            refresh_token,
        },
        "令牌刷新成功",
    )))
}
