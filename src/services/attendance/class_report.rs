//! 班级考勤报表
//!
//! 分班内每个学生一行；当天未点名的学生不缺行，
//! 以 not_marked 状态出现。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::ClassReportParams;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{ResourceKind, ScopeTarget};
use crate::services::{current_user, policy_context, scope_for};

pub async fn class_report(
    service: &AttendanceService,
    request: &HttpRequest,
    params: ClassReportParams,
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

    // 报表是教学人员视角；教师限制在本人相关的分班
    let section = match storage.get_section_by_id(params.section_id).await {
        Ok(Some(section)) => section,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "分班不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询分班失败: {e}"),
                )),
            );
        }
    };

    let class = match storage.get_class_by_id(section.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "班级不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级失败: {e}"),
                )),
            );
        }
    };

    if ctx.role == UserRole::Teacher {
        let target = ScopeTarget {
            school_id: Some(class.school_id),
            class_id: Some(class.id),
            section_id: Some(section.id),
            owner_id: Some(user.id),
            ..Default::default()
        };
        if !scope_for(&ctx, ResourceKind::AttendanceRecord).matches(&target) {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "分班不存在",
            )));
        }
    } else if ctx.school_id().is_some() && ctx.school_id() != Some(class.school_id) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "分班不存在",
        )));
    }

    match storage
        .class_attendance_report(params.section_id, params.date, params.subject_id)
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询班级报表失败: {e}"),
            )),
        ),
    }
}
