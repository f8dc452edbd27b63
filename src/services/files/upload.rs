//! 附件上传
//!
//! 文件内容是不透明二进制，写到本地上传目录；核心只保存元数据
//! （文件名、大小、类型、上传者、时间），对外暴露随机下载令牌。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::io::Write;

use super::FileService;
use crate::config::AppConfig;
use crate::models::files::responses::UploadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::random_code::generate_download_token;

fn allowed_type(config: &AppConfig, file_name: &str, content_type: &str) -> bool {
    let extension = file_name.rsplit('.').next().unwrap_or_default().to_lowercase();
    config.upload.allowed_types.iter().any(|allowed| {
        allowed.eq_ignore_ascii_case(content_type) || allowed.eq_ignore_ascii_case(&extension)
    })
}

pub async fn upload_file(
    service: &FileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("解析上传内容失败: {e}"),
                )));
            }
        };

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("unnamed")
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !allowed_type(config, &file_name, &content_type) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("不允许的文件类型: {content_type}"),
            )));
        }

        // 逐块读入并限制大小
        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        format!("读取上传内容失败: {e}"),
                    )));
                }
            };
            if data.len() + chunk.len() > config.upload.max_size {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "文件超过大小限制",
                )));
            }
            data.extend_from_slice(&chunk);
        }

        let token = generate_download_token();
        let disk_path = std::path::Path::new(&config.upload.dir).join(&token);

        if let Err(e) = std::fs::create_dir_all(&config.upload.dir) {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("创建上传目录失败: {e}"),
                )),
            );
        }
        let write_result = std::fs::File::create(&disk_path).and_then(|mut f| f.write_all(&data));
        if let Err(e) = write_result {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("写入文件失败: {e}"),
                )),
            );
        }

        let file_size = data.len() as i64;
        return match storage
            .upload_file(&token, &file_name, &file_size, &content_type, user.id)
            .await
        {
            Ok(file) => Ok(HttpResponse::Created().json(ApiResponse::success(
                UploadResponse {
                    download_token: file.download_token,
                    file_name: file.file_name,
                    file_size: file.file_size,
                },
                "上传成功",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("记录文件元数据失败: {e}"),
                )),
            ),
        };
    }

    Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        "请求中没有文件",
    )))
}
