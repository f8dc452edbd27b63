pub mod classes;
pub mod profiles;
pub mod schools;
pub mod sections;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::org::requests::{
    CreateClassRequest, CreateParentProfileRequest, CreatePrincipalProfileRequest,
    CreateSchoolRequest, CreateSectionRequest, CreateStudentProfileRequest, CreateSubjectRequest,
    CreateTeacherProfileRequest, OrgListQuery, UpdateSchoolRequest, UpdateSectionRequest,
    UpdateStudentProfileRequest, UpdateTeacherProfileRequest,
};
use crate::models::users::entities::UserRole;
use crate::policy::PolicyContext;
use crate::storage::Storage;

pub struct OrgService {
    storage: Option<Arc<dyn Storage>>,
}

impl OrgService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学校
    pub async fn create_school(
        &self,
        request: &HttpRequest,
        req: CreateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        schools::create_school(self, request, req).await
    }
    pub async fn list_schools(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        schools::list_schools(self, request, query).await
    }
    pub async fn get_school(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        schools::get_school(self, request, id).await
    }
    pub async fn update_school(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        schools::update_school(self, request, id, req).await
    }

    // 班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        req: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        classes::create_class(self, request, req).await
    }
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        classes::list_classes(self, request, query).await
    }

    // 分班
    pub async fn create_section(
        &self,
        request: &HttpRequest,
        req: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        sections::create_section(self, request, req).await
    }
    pub async fn list_sections(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        sections::list_sections(self, request, query).await
    }
    pub async fn update_section(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        sections::update_section(self, request, id, req).await
    }

    // 科目
    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        req: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, request, req).await
    }
    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request, query).await
    }

    // 档案
    pub async fn create_teacher_profile(
        &self,
        request: &HttpRequest,
        req: CreateTeacherProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_teacher_profile(self, request, req).await
    }
    pub async fn list_teacher_profiles(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        profiles::list_teacher_profiles(self, request, query).await
    }
    pub async fn update_teacher_profile(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateTeacherProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::update_teacher_profile(self, request, id, req).await
    }
    pub async fn create_student_profile(
        &self,
        request: &HttpRequest,
        req: CreateStudentProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_student_profile(self, request, req).await
    }
    pub async fn list_student_profiles(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        profiles::list_student_profiles(self, request, query).await
    }
    pub async fn update_student_profile(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateStudentProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::update_student_profile(self, request, id, req).await
    }
    pub async fn create_parent_profile(
        &self,
        request: &HttpRequest,
        req: CreateParentProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_parent_profile(self, request, req).await
    }
    pub async fn list_parent_profiles(
        &self,
        request: &HttpRequest,
        query: OrgListQuery,
    ) -> ActixResult<HttpResponse> {
        profiles::list_parent_profiles(self, request, query).await
    }
    pub async fn create_principal_profile(
        &self,
        request: &HttpRequest,
        req: CreatePrincipalProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_principal_profile(self, request, req).await
    }
}

/// 校长的组织结构查询强制收窄到本校；开发者不受限
pub(crate) fn scope_org_query(ctx: &PolicyContext, mut query: OrgListQuery) -> OrgListQuery {
    if ctx.role != UserRole::Developer {
        query.school_id = ctx.school_id();
    }
    // 非管理角色不允许查看已停用条目
    if !matches!(ctx.role, UserRole::Developer | UserRole::Principal) {
        query.include_inactive = false;
    }
    query
}
