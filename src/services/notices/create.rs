use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::notices::requests::CreateNoticeRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};

/// 发布通知（教学人员；目标班级为空表示全校通知）
pub async fn create_notice(
    service: &NoticeService,
    request: &HttpRequest,
    req: CreateNoticeRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Notice, Action::Create) {
        return Ok(resp);
    }

    // 通知归属发布者所在的学校
    let Some(school_id) = ctx.school_id() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "开发者账号没有学校归属，无法发布通知",
        )));
    };

    // 目标班级必须都在本校
    for class_id in &req.target_class_ids {
        match storage.get_class_by_id(*class_id).await {
            Ok(Some(class)) if class.school_id == school_id => {}
            Ok(Some(_)) | Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CrossSchoolReference,
                    format!("目标班级无效: {class_id}"),
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询班级失败: {e}"),
                    ),
                ));
            }
        }
    }

    match storage.create_notice(school_id, user.id, req).await {
        Ok(notice) => Ok(HttpResponse::Created().json(ApiResponse::success(notice, "发布通知成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("发布通知失败: {e}"),
            )),
        ),
    }
}
