//! 缴费动作（make-payment）
//!
//! 缴费金额不得超过未结余额；已缴累加与状态推导在存储层
//! 同一事务内完成，保证金额与状态不会出现不一致的中间态。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeeService;
use crate::errors::SchoolLmsError;
use crate::models::fees::requests::MakePaymentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{Action, ResourceKind};
use crate::services::{current_user, ensure_can, policy_context};

pub async fn make_payment(
    service: &FeeService,
    request: &HttpRequest,
    record_id: i64,
    req: MakePaymentRequest,
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
    // 登记缴费是费用管理动作，归校级管理角色
    if let Err(resp) = ensure_can(&ctx, ResourceKind::FeeRecord, Action::Update) {
        return Ok(resp);
    }

    // 校长限定本校记录
    if ctx.role == UserRole::Principal {
        match storage.get_fee_record_by_id(record_id).await {
            Ok(Some(record)) if ctx.school_id() == Some(record.school_id) => {}
            Ok(_) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::FeeRecordNotFound,
                    "缴费记录不存在",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询缴费记录失败: {e}"),
                    ),
                ));
            }
        }
    }

    match storage.apply_fee_payment(record_id, user.id, req).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "缴费成功"))),
        Err(SchoolLmsError::Validation(msg)) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::PaymentExceedsOutstanding, msg),
        )),
        Err(SchoolLmsError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::FeeRecordNotFound, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("缴费失败: {e}"),
            )),
        ),
    }
}
