use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

/// 费用汇总（在可见范围内聚合：学生本人 / 家长子女 / 校长本校 / 开发者全量）
pub async fn fee_summary(service: &FeeService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ctx = match policy_context(&storage, &user).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeRecord, Action::Read) {
        return Ok(resp);
    }

    let scope = scope_for(&ctx, ResourceKind::FeeRecord);
    match storage.fee_summary(&scope).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询费用汇总失败: {e}"),
            )),
        ),
    }
}
