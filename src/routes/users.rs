use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// 创建用户
pub async fn create_user(
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&req, body.into_inner()).await
}

// 列出用户
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .list_users(&req, query.into_inner().into())
        .await
}

// 获取用户详情
pub async fn get_user(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(&req, path.0).await
}

// 更新用户
pub async fn update_user(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(&req, path.0, body.into_inner())
        .await
}

// 删除用户
pub async fn delete_user(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, path.0).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 用户管理 - 仅校级管理角色
                    .route(
                        web::get()
                            .to(list_users)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::management_roles(),
                            )),
                    )
                    .route(
                        web::post()
                            .to(create_user)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::management_roles(),
                            )),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_user)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::management_roles(),
                            )),
                    )
                    .route(
                        web::put()
                            .to(update_user)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::management_roles(),
                            )),
                    )
                    // 硬删除 - 仅开发者
                    .route(
                        web::delete()
                            .to(delete_user)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
