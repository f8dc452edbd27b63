use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 附件元数据
//
// 文件内容是不透明的二进制，落在本地上传目录；核心只保存元数据。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    pub id: i64,
    /// 下载令牌，对外唯一标识
    pub download_token: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: Option<i64>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
