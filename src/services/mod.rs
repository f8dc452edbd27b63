//! 业务逻辑层
//!
//! 每个模块一个 Service；路由层只做参数提取，领域规则
//! （策略评估、引用完整性、派生计算）都在这里。

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
pub mod system;
pub mod users;

pub use academic::AcademicService;
pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use behavior::BehaviorService;
pub use fees::FeeService;
pub use files::FileService;
pub use messages::MessageService;
pub use notices::NoticeService;
pub use org::OrgService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, PolicyContext, PolicyResolver, ResourceKind, Scope};
use crate::storage::Storage;

/// 从请求扩展取当前用户（RequireJWT 之后必然存在）
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录"))
    })
}

/// 解析当前用户的策略上下文
pub(crate) async fn policy_context(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<PolicyContext, HttpResponse> {
    PolicyResolver::resolve(storage, user).await.map_err(|e| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("解析策略上下文失败: {e}"),
        ))
    })
}

/// 写权限检查：拒绝时统一返回 403（与空结果严格区分）
pub(crate) fn ensure_can(
    ctx: &PolicyContext,
    kind: ResourceKind,
    action: Action,
) -> Result<(), HttpResponse> {
    if crate::policy::can(ctx.role, kind, action) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有执行该操作的权限",
        )))
    }
}

/// 求当前主体对某资源的可见范围（读取全局策略配置）
pub(crate) fn scope_for(ctx: &PolicyContext, kind: ResourceKind) -> Scope {
    let config = AppConfig::get();
    ctx.scope(kind, config.policy.primary_guardian_only)
}
