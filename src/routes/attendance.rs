use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceStatisticsParams, BulkMarkAttendanceRequest,
    ClassReportParams, SummaryListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// 列出考勤记录
pub async fn list_records(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_records(&req, query.into_inner().into())
        .await
}

// 批量点名（幂等 upsert）
pub async fn bulk_mark(
    req: HttpRequest,
    body: web::Json<BulkMarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.bulk_mark(&req, body.into_inner()).await
}

// 考勤统计
pub async fn statistics(
    req: HttpRequest,
    query: web::Query<AttendanceStatisticsParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .statistics(&req, query.into_inner())
        .await
}

// 班级考勤报表
pub async fn class_report(
    req: HttpRequest,
    query: web::Query<ClassReportParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .class_report(&req, query.into_inner())
        .await
}

// 月度汇总
pub async fn list_summaries(
    req: HttpRequest,
    query: web::Query<SummaryListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_summaries(&req, query.into_inner().into())
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            // 列出考勤 - 所有登录用户（业务层按角色过滤可见范围）
            .service(web::resource("/records").route(web::get().to(list_records)))
            // 批量点名 - 仅教学人员
            .service(
                web::resource("/bulk-mark")
                    .route(web::post().to(bulk_mark).wrap(staff()))
                    .wrap(RateLimit::bulk_attendance()),
            )
            .service(web::resource("/statistics").route(web::get().to(statistics)))
            // 班级报表 - 仅教学人员
            .service(
                web::resource("/class-report").route(web::get().to(class_report).wrap(staff())),
            )
            .service(web::resource("/summaries").route(web::get().to(list_summaries))),
    );
}
