use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::org::requests::{
    CreateClassRequest, CreateParentProfileRequest, CreatePrincipalProfileRequest,
    CreateSchoolRequest, CreateSectionRequest, CreateStudentProfileRequest, CreateSubjectRequest,
    CreateTeacherProfileRequest, OrgListParams, UpdateSchoolRequest, UpdateSectionRequest,
    UpdateStudentProfileRequest, UpdateTeacherProfileRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::OrgService;
use crate::utils::SafeIDI64;

// 懒加载的全局 OrgService 实例
static ORG_SERVICE: Lazy<OrgService> = Lazy::new(OrgService::new_lazy);

// 学校
pub async fn create_school(
    req: HttpRequest,
    body: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE.create_school(&req, body.into_inner()).await
}
pub async fn list_schools(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_schools(&req, query.into_inner().into())
        .await
}
pub async fn get_school(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ORG_SERVICE.get_school(&req, path.0).await
}
pub async fn update_school(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .update_school(&req, path.0, body.into_inner())
        .await
}

// 班级
pub async fn create_class(
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE.create_class(&req, body.into_inner()).await
}
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_classes(&req, query.into_inner().into())
        .await
}

// 分班
pub async fn create_section(
    req: HttpRequest,
    body: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE.create_section(&req, body.into_inner()).await
}
pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_sections(&req, query.into_inner().into())
        .await
}
pub async fn update_section(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSectionRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .update_section(&req, path.0, body.into_inner())
        .await
}

// 科目
pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE.create_subject(&req, body.into_inner()).await
}
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_subjects(&req, query.into_inner().into())
        .await
}

// 档案
pub async fn create_teacher_profile(
    req: HttpRequest,
    body: web::Json<CreateTeacherProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .create_teacher_profile(&req, body.into_inner())
        .await
}
pub async fn list_teacher_profiles(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_teacher_profiles(&req, query.into_inner().into())
        .await
}
pub async fn update_teacher_profile(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTeacherProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .update_teacher_profile(&req, path.0, body.into_inner())
        .await
}
pub async fn create_student_profile(
    req: HttpRequest,
    body: web::Json<CreateStudentProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .create_student_profile(&req, body.into_inner())
        .await
}
pub async fn list_student_profiles(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_student_profiles(&req, query.into_inner().into())
        .await
}
pub async fn update_student_profile(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateStudentProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .update_student_profile(&req, path.0, body.into_inner())
        .await
}
pub async fn create_parent_profile(
    req: HttpRequest,
    body: web::Json<CreateParentProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .create_parent_profile(&req, body.into_inner())
        .await
}
pub async fn list_parent_profiles(
    req: HttpRequest,
    query: web::Query<OrgListParams>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .list_parent_profiles(&req, query.into_inner().into())
        .await
}
pub async fn create_principal_profile(
    req: HttpRequest,
    body: web::Json<CreatePrincipalProfileRequest>,
) -> ActixResult<HttpResponse> {
    ORG_SERVICE
        .create_principal_profile(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_org_routes(cfg: &mut web::ServiceConfig) {
    let management = || middlewares::RequireRole::new_any(UserRole::management_roles());

    cfg.service(
        web::scope("/api/v1/schools")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 所有登录用户可见（业务层限定本校）
                    .route(web::get().to(list_schools))
                    // 创建学校 - 仅开发者
                    .route(
                        web::post()
                            .to(create_school)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_school))
                    .route(web::put().to(update_school).wrap(management())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class).wrap(management())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/sections")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_sections))
                    .route(web::post().to(create_section).wrap(management())),
            )
            .service(
                web::resource("/{id}").route(web::put().to(update_section).wrap(management())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject).wrap(management())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/teachers")
                    .route(web::get().to(list_teacher_profiles))
                    .route(web::post().to(create_teacher_profile).wrap(management())),
            )
            .service(
                web::resource("/teachers/{id}")
                    .route(web::put().to(update_teacher_profile).wrap(management())),
            )
            .service(
                web::resource("/students")
                    .route(web::get().to(list_student_profiles))
                    .route(web::post().to(create_student_profile).wrap(management())),
            )
            .service(
                web::resource("/students/{id}")
                    .route(web::put().to(update_student_profile).wrap(management())),
            )
            .service(
                web::resource("/parents")
                    .route(web::get().to(list_parent_profiles))
                    .route(web::post().to(create_parent_profile).wrap(management())),
            )
            .service(
                web::resource("/principals").route(
                    web::post()
                        .to(create_principal_profile)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
