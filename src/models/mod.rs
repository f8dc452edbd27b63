//! 数据模型定义
//!
//! 按业务模块划分：每个模块包含 entities（业务实体）、
//! requests（请求参数）和 responses（响应结构）。

pub mod common;

pub mod academic;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod behavior;
pub mod fees;
pub mod files;
pub mod messages;
pub mod notices;
pub mod org;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于系统状态接口
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 约定：0 成功；4xxyy 客户端错误；5xxyy 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    ValidationFailed = 40001,
    PaymentExceedsOutstanding = 40002,
    CrossSchoolReference = 40003,

    Unauthorized = 40100,
    TokenExpired = 40101,
    TokenRevoked = 40102,

    Forbidden = 40300,

    NotFound = 40400,
    UserNotFound = 40401,
    SchoolNotFound = 40402,
    ClassNotFound = 40403,
    SectionNotFound = 40404,
    SubjectNotFound = 40405,
    StudentNotFound = 40406,
    ExamNotFound = 40407,
    MarkNotFound = 40408,
    AssignmentNotFound = 40409,
    SubmissionNotFound = 40410,
    FeeRecordNotFound = 40411,
    NoticeNotFound = 40412,
    BehaviorLogNotFound = 40413,
    MessageNotFound = 40414,
    TimetableSlotNotFound = 40415,
    FileNotFound = 40416,
    ProfileNotFound = 40417,

    UserAlreadyExists = 40900,
    Conflict = 40901,
    TimetableSlotConflict = 40902,

    InternalServerError = 50000,
    RateLimitExceeded = 50300,
}
