//! 缴费记录
//!
//! 可见性：学生本人、家长的子女并集、校长本校、开发者全量；
//! 教师对费用数据没有访问权（can 层面直接 403）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::errors::SchoolLmsError;
use crate::models::fees::entities::{FeeRecord, FeeStatus};
use crate::models::fees::requests::{CreateFeeRecordRequest, FeeRecordListQuery};
use crate::models::fees::responses::{FeeRecordDetailResponse, FeeRecordListItem};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind, ScopeTarget};
use crate::services::{current_user, ensure_can, policy_context, scope_for};

fn record_target(record: &FeeRecord) -> ScopeTarget {
    ScopeTarget {
        school_id: Some(record.school_id),
        student_id: Some(record.student_id),
        ..Default::default()
    }
}

pub async fn create_record(
    service: &FeeService,
    request: &HttpRequest,
    req: CreateFeeRecordRequest,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeRecord, Action::Create) {
        return Ok(resp);
    }

    let student = match storage.get_student_profile_by_id(req.student_id).await {
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

    if ctx.role == UserRole::Principal && ctx.school_id() != Some(student.school_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能为其他学校的学生创建缴费记录",
        )));
    }

    match storage.create_fee_record(student.school_id, req).await {
        Ok(record) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(record, "创建缴费记录成功")))
        }
        Err(SchoolLmsError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建缴费记录失败: {e}"),
            )),
        ),
    }
}

pub async fn list_records(
    service: &FeeService,
    request: &HttpRequest,
    query: FeeRecordListQuery,
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
    // 教师在这里收到 403，而不是空列表
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeRecord, Action::Read) {
        return Ok(resp);
    }

    let scope = scope_for(&ctx, ResourceKind::FeeRecord);
    match storage.list_fee_records(&scope, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取缴费记录成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取缴费记录失败: {e}"),
            )),
        ),
    }
}

/// 缴费记录详情（附流水）
pub async fn get_record(
    service: &FeeService,
    request: &HttpRequest,
    record_id: i64,
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
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeRecord, Action::Read) {
        return Ok(resp);
    }

    let record = match storage.get_fee_record_by_id(record_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeeRecordNotFound,
                "缴费记录不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询缴费记录失败: {e}"),
                )),
            );
        }
    };

    if !scope_for(&ctx, ResourceKind::FeeRecord).matches(&record_target(&record)) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeeRecordNotFound,
            "缴费记录不存在",
        )));
    }

    let payments = match storage.list_payments_for_record(record_id).await {
        Ok(payments) => payments,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询缴费流水失败: {e}"),
                )),
            );
        }
    };

    let today = chrono::Utc::now().date_naive();
    let outstanding_amount = record.outstanding();
    let is_overdue = today > record.due_date && record.status != FeeStatus::Paid;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FeeRecordDetailResponse {
            record: FeeRecordListItem {
                record,
                outstanding_amount,
                is_overdue,
            },
            payments,
        },
        "查询成功",
    )))
}
