use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BehaviorService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{ResourceKind, ScopeTarget};
use crate::services::{current_user, policy_context, scope_for};

/// 学生行为分汇总：各记录所属类别分值之和
pub async fn student_points(
    service: &BehaviorService,
    request: &HttpRequest,
    student_id: i64,
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

    let student = match storage.get_student_profile_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    let target = ScopeTarget {
        school_id: Some(student.school_id),
        student_id: Some(student.id),
        section_id: Some(student.section_id),
        ..Default::default()
    };
    if !scope_for(&ctx, ResourceKind::BehaviorLog).matches(&target) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        )));
    }

    match storage.student_behavior_points(student_id).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询行为分失败: {e}"),
            )),
        ),
    }
}
