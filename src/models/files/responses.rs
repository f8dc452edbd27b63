use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 上传成功响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct UploadResponse {
    pub download_token: String,
    pub file_name: String,
    pub file_size: i64,
}
