use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::fees::requests::{
    CreateFeeRecordRequest, CreateFeeStructureRequest, FeeRecordListParams,
    FeeStructureListParams, MakePaymentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FeeService;
use crate::utils::SafeIDI64;

// 懒加载的全局 FeeService 实例
static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

// 收费标准
pub async fn create_structure(
    req: HttpRequest,
    body: web::Json<CreateFeeStructureRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_structure(&req, body.into_inner()).await
}
pub async fn list_structures(
    req: HttpRequest,
    query: web::Query<FeeStructureListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .list_structures(&req, query.into_inner().into())
        .await
}

// 缴费记录
pub async fn create_record(
    req: HttpRequest,
    body: web::Json<CreateFeeRecordRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_record(&req, body.into_inner()).await
}
pub async fn list_records(
    req: HttpRequest,
    query: web::Query<FeeRecordListParams>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .list_records(&req, query.into_inner().into())
        .await
}
pub async fn get_record(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_record(&req, path.0).await
}

// 缴费
pub async fn make_payment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<MakePaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .make_payment(&req, path.0, body.into_inner())
        .await
}

// 费用汇总
pub async fn fee_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEE_SERVICE.fee_summary(&req).await
}

// 配置路由
pub fn configure_fees_routes(cfg: &mut web::ServiceConfig) {
    let management = || middlewares::RequireRole::new_any(UserRole::management_roles());

    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/structures")
                    // 收费标准管理 - 仅校级管理角色
                    .route(web::get().to(list_structures))
                    .route(web::post().to(create_structure).wrap(management())),
            )
            .service(
                web::resource("/records")
                    // 列出缴费记录 - 业务层按角色过滤（教师在业务层被拒绝）
                    .route(web::get().to(list_records))
                    .route(web::post().to(create_record).wrap(management())),
            )
            // summary 必须注册在 /records/{id} 之前
            .service(web::resource("/records/summary").route(web::get().to(fee_summary)))
            .service(web::resource("/records/{id}").route(web::get().to(get_record)))
            .service(
                web::resource("/records/{id}/make-payment")
                    .route(web::post().to(make_payment).wrap(management()))
                    .wrap(RateLimit::payment()),
            ),
    );
}
