use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::SummaryListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::ResourceKind;
use crate::services::{current_user, policy_context, scope_for};

/// 月度考勤汇总列表
///
/// 汇总是派生数据：每次考勤写入后由写入路径同步重算，
/// 这里只读。
pub async fn list_summaries(
    service: &AttendanceService,
    request: &HttpRequest,
    query: SummaryListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ctx = match policy_context(&storage, &user).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let scope = scope_for(&ctx, ResourceKind::AttendanceRecord);
    match storage.list_attendance_summaries(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取考勤汇总成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取考勤汇总失败: {e}"),
            )),
        ),
    }
}
