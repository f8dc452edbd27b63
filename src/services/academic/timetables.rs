//! 课程表操作
//!
//! 同一 (班级, 分班, 周几, 开始时间) 的重复条目是冲突错误，
//! 不做 upsert——这是与考勤/成绩不同的刻意选择。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicService;
use crate::errors::SchoolLmsError;
use crate::models::academic::requests::{CreateTimetableSlotRequest, TimetableListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

pub async fn list_timetable(
    service: &AcademicService,
    request: &HttpRequest,
    query: TimetableListQuery,
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

    let scope = scope_for(&ctx, ResourceKind::Timetable);
    match storage.list_timetable_slots(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取课程表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取课程表失败: {e}"),
            )),
        ),
    }
}

pub async fn create_timetable_slot(
    service: &AcademicService,
    request: &HttpRequest,
    req: CreateTimetableSlotRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Timetable, Action::Create) {
        return Ok(resp);
    }

    if req.end_time <= req.start_time {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "结束时间必须晚于开始时间",
        )));
    }

    // 归属学校经班级推导，并做跨校拦截
    let class = match storage.get_class_by_id(req.class_id).await {
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
            "不能跨学校创建课程表",
        )));
    }

    match storage.create_timetable_slot(class.school_id, req).await {
        Ok(slot) => Ok(HttpResponse::Created().json(ApiResponse::success(slot, "创建课程表成功"))),
        Err(SchoolLmsError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TimetableSlotConflict, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建课程表失败: {e}"),
            )),
        ),
    }
}

pub async fn delete_timetable_slot(
    service: &AcademicService,
    request: &HttpRequest,
    slot_id: i64,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::Timetable, Action::Delete) {
        return Ok(resp);
    }

    match storage.delete_timetable_slot(slot_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimetableSlotNotFound,
            "课程表条目不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除课程表失败: {e}"),
            )),
        ),
    }
}
