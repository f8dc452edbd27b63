//! 档案管理：教师/学生/家长/校长档案的创建与查询
//!
//! 档案是策略解析的数据来源，租户与班级/分班归属的不变式
//! 在存储层校验，这里负责角色匹配与越校拦截。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OrgService, scope_org_query};
use crate::errors::SchoolLmsError;
use crate::models::org::requests::{
    CreateParentProfileRequest, CreatePrincipalProfileRequest, CreateStudentProfileRequest,
    CreateTeacherProfileRequest, OrgListQuery, UpdateStudentProfileRequest,
    UpdateTeacherProfileRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::PolicyContext;
use crate::services::{current_user, policy_context};
use crate::storage::Storage;
use std::sync::Arc;

/// 校验档案目标用户存在且角色匹配
async fn verify_user_role(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    expected: UserRole,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.role == expected => Ok(()),
        Ok(Some(user)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("用户角色不匹配: 期望 {expected}, 实际 {}", user.role),
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询用户失败: {e}"),
            )),
        ),
    }
}

/// 校长只能在本校建档
fn verify_same_school(ctx: &PolicyContext, school_id: i64) -> Result<(), HttpResponse> {
    if ctx.role == UserRole::Principal && ctx.school_id() != Some(school_id) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CrossSchoolReference,
            "不能在其他学校创建档案",
        )));
    }
    Ok(())
}

pub async fn create_teacher_profile(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateTeacherProfileRequest,
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
    if let Err(resp) = verify_same_school(&ctx, req.school_id) {
        return Ok(resp);
    }
    if let Err(resp) = verify_user_role(&storage, req.user_id, UserRole::Teacher).await {
        return Ok(resp);
    }

    match storage.create_teacher_profile(req).await {
        Ok(profile) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(profile, "创建教师档案成功")))
        }
        Err(SchoolLmsError::TenantViolation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CrossSchoolReference, msg))),
        Err(SchoolLmsError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建教师档案失败: {e}"),
            )),
        ),
    }
}

pub async fn list_teacher_profiles(
    service: &OrgService,
    request: &HttpRequest,
    query: OrgListQuery,
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

    match storage
        .list_teacher_profiles(scope_org_query(&ctx, query))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取教师档案列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取教师档案列表失败: {e}"),
            )),
        ),
    }
}

pub async fn update_teacher_profile(
    service: &OrgService,
    request: &HttpRequest,
    id: i64,
    req: UpdateTeacherProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_teacher_profile(id, req).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "教师档案不存在",
        ))),
        Err(SchoolLmsError::TenantViolation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CrossSchoolReference, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新教师档案失败: {e}"),
            )),
        ),
    }
}

pub async fn create_student_profile(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateStudentProfileRequest,
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
    if let Err(resp) = verify_same_school(&ctx, req.school_id) {
        return Ok(resp);
    }
    if let Err(resp) = verify_user_role(&storage, req.user_id, UserRole::Student).await {
        return Ok(resp);
    }

    match storage.create_student_profile(req).await {
        Ok(profile) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(profile, "创建学生档案成功")))
        }
        Err(SchoolLmsError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))),
        Err(SchoolLmsError::TenantViolation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CrossSchoolReference, msg))),
        Err(SchoolLmsError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建学生档案失败: {e}"),
            )),
        ),
    }
}

pub async fn list_student_profiles(
    service: &OrgService,
    request: &HttpRequest,
    query: OrgListQuery,
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

    match storage
        .list_student_profiles(scope_org_query(&ctx, query))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取学生档案列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取学生档案列表失败: {e}"),
            )),
        ),
    }
}

/// 更新学生档案（转班等；班级/分班归属在存储层重校验）
pub async fn update_student_profile(
    service: &OrgService,
    request: &HttpRequest,
    id: i64,
    req: UpdateStudentProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_student_profile(id, req).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "更新成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "学生档案不存在",
        ))),
        Err(SchoolLmsError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))),
        Err(SchoolLmsError::TenantViolation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CrossSchoolReference, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新学生档案失败: {e}"),
            )),
        ),
    }
}

pub async fn create_parent_profile(
    service: &OrgService,
    request: &HttpRequest,
    req: CreateParentProfileRequest,
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
    if let Err(resp) = verify_same_school(&ctx, req.school_id) {
        return Ok(resp);
    }
    if let Err(resp) = verify_user_role(&storage, req.user_id, UserRole::Parent).await {
        return Ok(resp);
    }

    match storage.create_parent_profile(req).await {
        Ok(profile) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(profile, "创建家长档案成功")))
        }
        Err(SchoolLmsError::TenantViolation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CrossSchoolReference, msg))),
        Err(SchoolLmsError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg)))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建家长档案失败: {e}"),
            )),
        ),
    }
}

pub async fn list_parent_profiles(
    service: &OrgService,
    request: &HttpRequest,
    query: OrgListQuery,
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

    match storage
        .list_parent_profiles(scope_org_query(&ctx, query))
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取家长档案列表成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取家长档案列表失败: {e}"),
            )),
        ),
    }
}

/// 创建校长档案（仅开发者，路由层已门禁）
pub async fn create_principal_profile(
    service: &OrgService,
    request: &HttpRequest,
    req: CreatePrincipalProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = verify_user_role(&storage, req.user_id, UserRole::Principal).await {
        return Ok(resp);
    }

    match storage.create_principal_profile(req).await {
        Ok(profile) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(profile, "创建校长档案成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建校长档案失败: {e}"),
            )),
        ),
    }
}
