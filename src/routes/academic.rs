use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academic::requests::{
    CreateExamRequest, CreateTimetableSlotRequest, ExamListParams, MarkListParams,
    TimetableListParams, UpdateExamRequest, UpsertMarkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AcademicService 实例
static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

// 列出考试
pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .list_exams(&req, query.into_inner().into())
        .await
}

// 创建考试
pub async fn create_exam(
    req: HttpRequest,
    body: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.create_exam(&req, body.into_inner()).await
}

// 获取考试详情
pub async fn get_exam(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_exam(&req, path.0).await
}

// 更新考试
pub async fn update_exam(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_exam(&req, path.0, body.into_inner())
        .await
}

// 删除考试
pub async fn delete_exam(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_exam(&req, path.0).await
}

// 列出成绩
pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .list_marks(&req, query.into_inner().into())
        .await
}

// 录入成绩（upsert）
pub async fn upsert_mark(
    req: HttpRequest,
    body: web::Json<UpsertMarkRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.upsert_mark(&req, body.into_inner()).await
}

// 学生成绩汇总
pub async fn student_performance(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.student_performance(&req, path.0).await
}

// 课程表
pub async fn list_timetable(
    req: HttpRequest,
    query: web::Query<TimetableListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .list_timetable(&req, query.into_inner().into())
        .await
}
pub async fn create_timetable_slot(
    req: HttpRequest,
    body: web::Json<CreateTimetableSlotRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .create_timetable_slot(&req, body.into_inner())
        .await
}
pub async fn delete_timetable_slot(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_timetable_slot(&req, path.0).await
}

// 配置路由
pub fn configure_academic_routes(cfg: &mut web::ServiceConfig) {
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出考试 - 所有登录用户（业务层按角色过滤可见范围）
                    .route(web::get().to(list_exams))
                    // 创建考试 - 仅教学人员
                    .route(web::post().to(create_exam).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_exam))
                    .route(web::put().to(update_exam).wrap(staff()))
                    .route(web::delete().to(delete_exam).wrap(staff())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/marks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_marks))
                    // 录入成绩 - 仅教学人员；重复录入走 upsert
                    .route(web::post().to(upsert_mark).wrap(staff())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}/performance").route(web::get().to(student_performance)),
            ),
    );

    cfg.service(
        web::scope("/api/v1/timetable")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_timetable))
                    .route(web::post().to(create_timetable_slot).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::delete().to(delete_timetable_slot).wrap(staff())),
            ),
    );
}
