//! 路径参数安全提取器
//!
//! 路径里的 ID 解析失败时返回统一的 400 响应，
//! 而不是 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorBadRequest};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static FILE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{32}$").expect("Invalid file token regex"));

fn bad_request(message: &str) -> actix_web::Error {
    let body = serde_json::to_string(&ApiResponse::error_empty(ErrorCode::BadRequest, message))
        .unwrap_or_else(|_| message.to_string());
    ErrorBadRequest(body)
}

/// 正整数 ID 路径参数
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(SafeIDI64)
            .ok_or_else(|| bad_request("无效的 ID 参数"));
        ready(result)
    }
}

/// 文件下载令牌路径参数
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("token")
            .filter(|raw| FILE_TOKEN_RE.is_match(raw))
            .map(|raw| SafeFileToken(raw.to_string()))
            .ok_or_else(|| bad_request("无效的文件令牌"));
        ready(result)
    }
}
