use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{ApiResponse, AppStartTime};

pub struct SystemService;

/// 系统状态
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatusResponse {
    pub version: String,
    pub uptime_seconds: i64,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 系统状态（健康检查 + 运行时长）
    pub async fn status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let uptime_seconds = request
            .app_data::<actix_web::web::Data<AppStartTime>>()
            .map(|start| {
                chrono::Utc::now()
                    .signed_duration_since(start.start_datetime)
                    .num_seconds()
            })
            .unwrap_or(0);

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            SystemStatusResponse {
                version: env!("CARGO_PKG_VERSION").to_string(),
                uptime_seconds,
            },
            "系统运行正常",
        )))
    }
}
