use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::AttendanceStatisticsParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::ResourceKind;
use crate::services::{current_user, policy_context, scope_for};

/// 考勤统计（在可见范围内计数）
pub async fn statistics(
    service: &AttendanceService,
    request: &HttpRequest,
    params: AttendanceStatisticsParams,
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
    match storage
        .attendance_statistics(
            &scope,
            params.class_id,
            params.student_id,
            params.date_from,
            params.date_to,
        )
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "统计成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("考勤统计失败: {e}"),
            )),
        ),
    }
}
