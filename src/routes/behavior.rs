use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::behavior::requests::{
    BehaviorLogListParams, CreateBehaviorCategoryRequest, CreateBehaviorLogRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BehaviorService;
use crate::utils::SafeIDI64;

// 懒加载的全局 BehaviorService 实例
static BEHAVIOR_SERVICE: Lazy<BehaviorService> = Lazy::new(BehaviorService::new_lazy);

// 行为类别
pub async fn list_categories(req: HttpRequest) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.list_categories(&req).await
}
pub async fn create_category(
    req: HttpRequest,
    body: web::Json<CreateBehaviorCategoryRequest>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.create_category(&req, body.into_inner()).await
}

// 行为记录
pub async fn list_logs(
    req: HttpRequest,
    query: web::Query<BehaviorLogListParams>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE
        .list_logs(&req, query.into_inner().into())
        .await
}
pub async fn create_log(
    req: HttpRequest,
    body: web::Json<CreateBehaviorLogRequest>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.create_log(&req, body.into_inner()).await
}

// 学生行为分汇总
pub async fn student_points(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.student_points(&req, path.0).await
}

// 配置路由
pub fn configure_behavior_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/behavior")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/categories")
                    .route(web::get().to(list_categories))
                    // 类别管理 - 仅校级管理角色
                    .route(
                        web::post()
                            .to(create_category)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::management_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/logs")
                    // 列出记录 - 所有登录用户（业务层按角色过滤可见范围）
                    .route(web::get().to(list_logs))
                    // 记录行为 - 仅教学人员
                    .route(
                        web::post()
                            .to(create_log)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/students/{id}/points").route(web::get().to(student_points)),
            ),
    );
}
