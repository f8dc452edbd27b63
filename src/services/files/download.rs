use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FileService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};

/// 按下载令牌取回附件
pub async fn download_file(
    service: &FileService,
    request: &HttpRequest,
    token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let file = match storage.get_file_by_token(&token).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询文件失败: {e}"),
                )),
            );
        }
    };

    let disk_path = std::path::Path::new(&config.upload.dir).join(&file.download_token);
    match std::fs::read(&disk_path) {
        Ok(data) => Ok(HttpResponse::Ok()
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file.file_name),
            ))
            .content_type(file.file_type.as_str())
            .body(data)),
        Err(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "文件内容缺失",
        ))),
    }
}
