//! 批量点名
//!
//! 幂等：同一 (student, class, subject, date) 重复提交只保留一条记录
//! （覆盖更新）。整批在一个事务中提交，随后同步重算受影响学生的
//! 月度汇总。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::BulkMarkAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};

pub async fn bulk_mark(
    service: &AttendanceService,
    request: &HttpRequest,
    req: BulkMarkAttendanceRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::AttendanceRecord, Action::Create) {
        return Ok(resp);
    }

    if req.entries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "点名名单不能为空",
        )));
    }

    // 分班归属与租户校验
    let section = match storage.get_section_by_id(req.section_id).await {
        Ok(Some(section)) if section.class_id == req.class_id => section,
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "分班不属于该班级",
            )));
        }
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

    if let Some(school_id) = ctx.school_id()
        && school_id != class.school_id
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能跨学校点名",
        )));
    }

    // 名单中的学生必须都在该分班
    for entry in &req.entries {
        match storage.get_student_profile_by_id(entry.student_id).await {
            Ok(Some(student)) if student.section_id == req.section_id => {}
            Ok(Some(_)) | Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    format!("学生 {} 不属于该分班", entry.student_id),
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询学生失败: {e}"),
                    ),
                ));
            }
        }
    }

    match storage
        .bulk_mark_attendance(class.school_id, user.id, req)
        .await
    {
        Ok(resp) => {
            let message = format!("已为 {} 名学生点名", resp.marked_count);
            Ok(HttpResponse::Ok().json(ApiResponse::success(resp, message)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("批量点名失败: {e}"),
            )),
        ),
    }
}
