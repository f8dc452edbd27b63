use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::FileService;
use crate::utils::SafeFileToken;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

// 上传附件
pub async fn upload_file(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload(&req, payload).await
}

// 按令牌下载附件
pub async fn download_file(req: HttpRequest, path: SafeFileToken) -> ActixResult<HttpResponse> {
    FILE_SERVICE.download(&req, path.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .route(web::post().to(upload_file))
                    .wrap(RateLimit::file_upload()),
            )
            .service(web::resource("/{token}").route(web::get().to(download_file))),
    );
}
