use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::ResourceKind;
use crate::services::{current_user, policy_context, scope_for};

/// 考勤记录列表
///
/// 家长看到的是全部子女记录的并集；排序固定为日期倒序、
/// 学生姓名升序。
pub async fn list_records(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListQuery,
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
    match storage.list_attendance_records(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取考勤列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取考勤列表失败: {e}"),
            )),
        ),
    }
}
