use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{ResourceKind, ScopeTarget};
use crate::services::{current_user, policy_context, scope_for};

/// 学生作业进度
///
/// 结果覆盖该生分班的全部已布置作业：没有提交的作业
/// 以 submitted=false 的占位行出现，不会被省略。
pub async fn student_progress(
    service: &AssignmentService,
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

    // 学生/家长按提交记录的归属判定；教学人员限定同校
    let allowed = match ctx.role {
        UserRole::Developer => true,
        UserRole::Teacher | UserRole::Principal => ctx.school_id() == Some(student.school_id),
        UserRole::Student | UserRole::Parent => {
            let target = ScopeTarget {
                school_id: Some(student.school_id),
                student_id: Some(student.id),
                class_id: Some(student.class_id),
                section_id: Some(student.section_id),
                ..Default::default()
            };
            scope_for(&ctx, ResourceKind::Submission).matches(&target)
        }
    };
    if !allowed {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        )));
    }

    match storage.student_assignment_progress(&student).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业进度失败: {e}"),
            )),
        ),
    }
}
