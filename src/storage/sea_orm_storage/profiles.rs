//! 角色档案存储操作

use super::SeaOrmStorage;
use crate::entity::{
    classes, parent_children, parent_profiles, principal_profiles, sections, student_profiles,
    teacher_profiles, teacher_sections, teacher_subjects,
};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    org::{
        entities::{ParentProfile, PrincipalProfile, StudentProfile, TeacherProfile},
        requests::{
            CreateParentProfileRequest, CreatePrincipalProfileRequest,
            CreateStudentProfileRequest, CreateTeacherProfileRequest, OrgListQuery,
            UpdateStudentProfileRequest, UpdateTeacherProfileRequest,
        },
        responses::{
            ParentProfileListResponse, StudentProfileListResponse, TeacherProfileListResponse,
        },
    },
};
use crate::policy::ChildLink;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 校验分班属于给定班级（学生档案不变式）
    async fn verify_section_in_class(&self, section_id: i64, class_id: i64) -> Result<()> {
        let section = sections::Entity::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班失败: {e}")))?
            .ok_or_else(|| SchoolLmsError::not_found(format!("分班不存在: {section_id}")))?;

        if section.class_id != class_id {
            return Err(SchoolLmsError::validation(format!(
                "分班 {section_id} 不属于班级 {class_id}"
            )));
        }
        Ok(())
    }

    /// 校验分班与学校同租户（教师分管不变式）
    async fn verify_section_in_school(&self, section_id: i64, school_id: i64) -> Result<()> {
        let section = sections::Entity::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班失败: {e}")))?
            .ok_or_else(|| SchoolLmsError::not_found(format!("分班不存在: {section_id}")))?;

        let class = classes::Entity::find_by_id(section.class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级失败: {e}")))?
            .ok_or_else(|| SchoolLmsError::not_found(format!("班级不存在: {}", section.class_id)))?;

        if class.school_id != school_id {
            return Err(SchoolLmsError::tenant_violation(format!(
                "分班 {section_id} 不属于学校 {school_id}"
            )));
        }
        Ok(())
    }

    async fn teacher_subject_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let rows = teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询任课科目失败: {e}")))?;
        Ok(rows.into_iter().map(|r| r.subject_id).collect())
    }

    async fn teacher_section_ids(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let rows = teacher_sections::Entity::find()
            .filter(teacher_sections::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分管分班失败: {e}")))?;
        Ok(rows.into_iter().map(|r| r.section_id).collect())
    }

    async fn replace_teacher_subjects(&self, teacher_id: i64, subject_ids: &[i64]) -> Result<()> {
        teacher_subjects::Entity::delete_many()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("清理任课科目失败: {e}")))?;

        for subject_id in subject_ids {
            let model = teacher_subjects::ActiveModel {
                teacher_id: Set(teacher_id),
                subject_id: Set(*subject_id),
                ..Default::default()
            };
            model.insert(&self.db).await.map_err(|e| {
                SchoolLmsError::database_operation(format!("写入任课科目失败: {e}"))
            })?;
        }
        Ok(())
    }

    async fn replace_teacher_sections(
        &self,
        teacher_id: i64,
        school_id: i64,
        section_ids: &[i64],
    ) -> Result<()> {
        for section_id in section_ids {
            self.verify_section_in_school(*section_id, school_id).await?;
        }

        teacher_sections::Entity::delete_many()
            .filter(teacher_sections::Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("清理分管分班失败: {e}")))?;

        for section_id in section_ids {
            let model = teacher_sections::ActiveModel {
                teacher_id: Set(teacher_id),
                section_id: Set(*section_id),
                ..Default::default()
            };
            model.insert(&self.db).await.map_err(|e| {
                SchoolLmsError::database_operation(format!("写入分管分班失败: {e}"))
            })?;
        }
        Ok(())
    }

    /// 创建教师档案
    pub async fn create_teacher_profile_impl(
        &self,
        req: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile> {
        let model = teacher_profiles::ActiveModel {
            user_id: Set(req.user_id),
            school_id: Set(req.school_id),
            employee_id: Set(req.employee_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建教师档案失败: {e}")))?;

        self.replace_teacher_subjects(result.id, &req.subject_ids)
            .await?;
        self.replace_teacher_sections(result.id, result.school_id, &req.section_ids)
            .await?;

        Ok(result.into_teacher_profile(req.subject_ids, req.section_ids))
    }

    pub async fn get_teacher_profile_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let Some(model) = teacher_profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询教师档案失败: {e}")))?
        else {
            return Ok(None);
        };

        let subject_ids = self.teacher_subject_ids(model.id).await?;
        let section_ids = self.teacher_section_ids(model.id).await?;
        Ok(Some(model.into_teacher_profile(subject_ids, section_ids)))
    }

    pub async fn get_teacher_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let Some(model) = teacher_profiles::Entity::find()
            .filter(teacher_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询教师档案失败: {e}")))?
        else {
            return Ok(None);
        };

        let subject_ids = self.teacher_subject_ids(model.id).await?;
        let section_ids = self.teacher_section_ids(model.id).await?;
        Ok(Some(model.into_teacher_profile(subject_ids, section_ids)))
    }

    /// 分页列出教师档案
    pub async fn list_teacher_profiles_impl(
        &self,
        query: OrgListQuery,
    ) -> Result<TeacherProfileListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = teacher_profiles::Entity::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(teacher_profiles::Column::SchoolId.eq(school_id));
        }
        if !query.include_inactive {
            select = select.filter(teacher_profiles::Column::IsActive.eq(true));
        }

        select = select.order_by_asc(teacher_profiles::Column::LastName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询教师档案总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询教师档案页数失败: {e}"))
        })?;

        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询教师档案列表失败: {e}"))
        })?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let subject_ids = self.teacher_subject_ids(model.id).await?;
            let section_ids = self.teacher_section_ids(model.id).await?;
            items.push(model.into_teacher_profile(subject_ids, section_ids));
        }

        Ok(TeacherProfileListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_teacher_profile_impl(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>> {
        let Some(existing) = self.get_teacher_profile_by_id_impl(id).await? else {
            return Ok(None);
        };

        let mut model = teacher_profiles::ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新教师档案失败: {e}")))?;

        if let Some(subject_ids) = update.subject_ids {
            self.replace_teacher_subjects(id, &subject_ids).await?;
        }
        if let Some(section_ids) = update.section_ids {
            self.replace_teacher_sections(id, existing.school_id, &section_ids)
                .await?;
        }

        self.get_teacher_profile_by_id_impl(id).await
    }

    /// 创建学生档案
    pub async fn create_student_profile_impl(
        &self,
        req: CreateStudentProfileRequest,
    ) -> Result<StudentProfile> {
        // 不变式：分班必须属于所报班级，且班级属于同一学校
        self.verify_section_in_class(req.section_id, req.class_id)
            .await?;
        self.verify_section_in_school(req.section_id, req.school_id)
            .await?;

        let model = student_profiles::ActiveModel {
            user_id: Set(req.user_id),
            school_id: Set(req.school_id),
            student_code: Set(req.student_code),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            class_id: Set(req.class_id),
            section_id: Set(req.section_id),
            roll_number: Set(req.roll_number),
            admission_date: Set(req.admission_date),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建学生档案失败: {e}")))?;

        Ok(result.into_student_profile())
    }

    pub async fn get_student_profile_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = student_profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    pub async fn get_student_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = student_profiles::Entity::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    /// 分页列出学生档案
    pub async fn list_student_profiles_impl(
        &self,
        query: OrgListQuery,
    ) -> Result<StudentProfileListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = student_profiles::Entity::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(student_profiles::Column::SchoolId.eq(school_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(student_profiles::Column::ClassId.eq(class_id));
        }
        if !query.include_inactive {
            select = select.filter(student_profiles::Column::IsActive.eq(true));
        }

        select = select
            .order_by_asc(student_profiles::Column::FirstName)
            .order_by_asc(student_profiles::Column::LastName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询学生档案总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询学生档案页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询学生档案列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_student_profile())
            .collect();

        Ok(StudentProfileListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_student_profile_impl(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>> {
        let Some(existing) = self.get_student_profile_by_id_impl(id).await? else {
            return Ok(None);
        };

        // 转班时重新校验班级/分班归属
        let class_id = update.class_id.unwrap_or(existing.class_id);
        let section_id = update.section_id.unwrap_or(existing.section_id);
        self.verify_section_in_class(section_id, class_id).await?;
        self.verify_section_in_school(section_id, existing.school_id)
            .await?;

        let mut model = student_profiles::ActiveModel {
            id: Set(id),
            class_id: Set(class_id),
            section_id: Set(section_id),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(roll_number) = update.roll_number {
            model.roll_number = Set(Some(roll_number));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新学生档案失败: {e}")))?;

        self.get_student_profile_by_id_impl(id).await
    }

    /// 列出分班内全部学生（报表用，按姓名排序）
    pub async fn list_students_by_section_impl(
        &self,
        section_id: i64,
    ) -> Result<Vec<StudentProfile>> {
        let models = student_profiles::Entity::find()
            .filter(student_profiles::Column::SectionId.eq(section_id))
            .filter(student_profiles::Column::IsActive.eq(true))
            .order_by_asc(student_profiles::Column::FirstName)
            .order_by_asc(student_profiles::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班学生失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_student_profile()).collect())
    }

    /// 创建家长档案（children 首个为主监护）
    pub async fn create_parent_profile_impl(
        &self,
        req: CreateParentProfileRequest,
    ) -> Result<ParentProfile> {
        // 租户校验：子女必须与家长同校
        for student_id in &req.children_ids {
            let student = self
                .get_student_profile_by_id_impl(*student_id)
                .await?
                .ok_or_else(|| {
                    SchoolLmsError::not_found(format!("学生档案不存在: {student_id}"))
                })?;
            if student.school_id != req.school_id {
                return Err(SchoolLmsError::tenant_violation(format!(
                    "学生 {student_id} 不属于学校 {}",
                    req.school_id
                )));
            }
        }

        let model = parent_profiles::ActiveModel {
            user_id: Set(req.user_id),
            school_id: Set(req.school_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            occupation: Set(req.occupation),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建家长档案失败: {e}")))?;

        for (index, student_id) in req.children_ids.iter().enumerate() {
            let link = parent_children::ActiveModel {
                parent_id: Set(result.id),
                student_id: Set(*student_id),
                is_primary: Set(index == 0),
                ..Default::default()
            };
            link.insert(&self.db).await.map_err(|e| {
                SchoolLmsError::database_operation(format!("写入家长子女关联失败: {e}"))
            })?;
        }

        Ok(result.into_parent_profile(req.children_ids))
    }

    pub async fn get_parent_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<ParentProfile>> {
        let Some(model) = parent_profiles::Entity::find()
            .filter(parent_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询家长档案失败: {e}")))?
        else {
            return Ok(None);
        };

        let children = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(model.id))
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询家长子女关联失败: {e}"))
            })?;

        let children_ids = children.into_iter().map(|c| c.student_id).collect();
        Ok(Some(model.into_parent_profile(children_ids)))
    }

    /// 分页列出家长档案
    pub async fn list_parent_profiles_impl(
        &self,
        query: OrgListQuery,
    ) -> Result<ParentProfileListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = parent_profiles::Entity::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(parent_profiles::Column::SchoolId.eq(school_id));
        }
        if !query.include_inactive {
            select = select.filter(parent_profiles::Column::IsActive.eq(true));
        }

        select = select.order_by_asc(parent_profiles::Column::LastName);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询家长档案总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询家长档案页数失败: {e}"))
        })?;

        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolLmsError::database_operation(format!("查询家长档案列表失败: {e}"))
        })?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            let children = parent_children::Entity::find()
                .filter(parent_children::Column::ParentId.eq(model.id))
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolLmsError::database_operation(format!("查询家长子女关联失败: {e}"))
                })?;
            let children_ids = children.into_iter().map(|c| c.student_id).collect();
            items.push(model.into_parent_profile(children_ids));
        }

        Ok(ParentProfileListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 家长子女链接（含子女的班级/分班，策略解析用）
    pub async fn list_parent_children_links_impl(
        &self,
        parent_id: i64,
    ) -> Result<Vec<ChildLink>> {
        let links = parent_children::Entity::find()
            .filter(parent_children::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolLmsError::database_operation(format!("查询家长子女关联失败: {e}"))
            })?;

        let mut result = Vec::with_capacity(links.len());
        for link in links {
            let Some(student) = self
                .get_student_profile_by_id_impl(link.student_id)
                .await?
            else {
                continue;
            };
            result.push(ChildLink {
                student_id: student.id,
                class_id: student.class_id,
                section_id: student.section_id,
                is_primary: link.is_primary,
            });
        }
        Ok(result)
    }

    /// 创建校长档案
    pub async fn create_principal_profile_impl(
        &self,
        req: CreatePrincipalProfileRequest,
    ) -> Result<PrincipalProfile> {
        let model = principal_profiles::ActiveModel {
            user_id: Set(req.user_id),
            school_id: Set(req.school_id),
            employee_id: Set(req.employee_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建校长档案失败: {e}")))?;

        Ok(result.into_principal_profile())
    }

    pub async fn get_principal_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<PrincipalProfile>> {
        let result = principal_profiles::Entity::find()
            .filter(principal_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询校长档案失败: {e}")))?;

        Ok(result.map(|m| m.into_principal_profile()))
    }
}
