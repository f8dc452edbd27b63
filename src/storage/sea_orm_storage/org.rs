//! 组织结构存储操作：学校、班级、分班、科目

use super::SeaOrmStorage;
use crate::entity::{classes, schools, sections, subjects};
use crate::errors::{Result, SchoolLmsError};
use crate::models::{
    PaginationInfo,
    org::{
        entities::{Class, School, Section, Subject},
        requests::{
            CreateClassRequest, CreateSchoolRequest, CreateSectionRequest, CreateSubjectRequest,
            OrgListQuery, UpdateSchoolRequest, UpdateSectionRequest,
        },
        responses::{
            ClassListResponse, SchoolListResponse, SectionListResponse, SubjectListResponse,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学校
    pub async fn create_school_impl(&self, req: CreateSchoolRequest) -> Result<School> {
        let now = chrono::Utc::now().timestamp();

        let model = schools::ActiveModel {
            name: Set(req.name),
            address: Set(req.address),
            phone: Set(req.phone),
            email: Set(req.email),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建学校失败: {e}")))?;

        Ok(result.into_school())
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<Option<School>> {
        let result = schools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学校失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }

    /// 分页列出学校
    pub async fn list_schools_impl(&self, query: OrgListQuery) -> Result<SchoolListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = schools::Entity::find();

        if !query.include_inactive {
            select = select.filter(schools::Column::IsActive.eq(true));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(schools::Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(schools::Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学校总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学校页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询学校列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_school())
            .collect();

        Ok(SchoolListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_school_impl(
        &self,
        id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>> {
        let existing = self.get_school_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = schools::ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新学校失败: {e}")))?;

        self.get_school_by_id_impl(id).await
    }

    /// 创建班级（校内同名班级冲突）
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let existing = classes::Entity::find()
            .filter(classes::Column::SchoolId.eq(req.school_id))
            .filter(classes::Column::Name.eq(req.name.clone()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级失败: {e}")))?;

        if existing.is_some() {
            return Err(SchoolLmsError::conflict(format!(
                "班级名已存在: {}",
                req.name
            )));
        }

        let model = classes::ActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = classes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_impl(&self, query: OrgListQuery) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = classes::Entity::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(classes::Column::SchoolId.eq(school_id));
        }

        if !query.include_inactive {
            select = select.filter(classes::Column::IsActive.eq(true));
        }

        select = select.order_by_asc(classes::Column::GradeLevel);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询班级列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_class())
            .collect();

        Ok(ClassListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 创建分班（班级内同名分班冲突）
    pub async fn create_section_impl(&self, req: CreateSectionRequest) -> Result<Section> {
        let existing = sections::Entity::find()
            .filter(sections::Column::ClassId.eq(req.class_id))
            .filter(sections::Column::Name.eq(req.name.clone()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班失败: {e}")))?;

        if existing.is_some() {
            return Err(SchoolLmsError::conflict(format!(
                "分班名已存在: {}",
                req.name
            )));
        }

        let model = sections::ActiveModel {
            class_id: Set(req.class_id),
            name: Set(req.name),
            homeroom_teacher_id: Set(req.homeroom_teacher_id),
            max_capacity: Set(req.max_capacity.unwrap_or(30)),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建分班失败: {e}")))?;

        Ok(result.into_section())
    }

    pub async fn get_section_by_id_impl(&self, id: i64) -> Result<Option<Section>> {
        let result = sections::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

    /// 分页列出分班
    pub async fn list_sections_impl(&self, query: OrgListQuery) -> Result<SectionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = sections::Entity::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(sections::Column::ClassId.eq(class_id));
        }

        if !query.include_inactive {
            select = select.filter(sections::Column::IsActive.eq(true));
        }

        select = select.order_by_asc(sections::Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询分班列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_section())
            .collect();

        Ok(SectionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_section_impl(
        &self,
        id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        let existing = self.get_section_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = sections::ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(teacher_id) = update.homeroom_teacher_id {
            model.homeroom_teacher_id = Set(Some(teacher_id));
        }
        if let Some(max_capacity) = update.max_capacity {
            model.max_capacity = Set(max_capacity);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("更新分班失败: {e}")))?;

        self.get_section_by_id_impl(id).await
    }

    /// 创建科目（校内代码唯一）
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let existing = subjects::Entity::find()
            .filter(subjects::Column::SchoolId.eq(req.school_id))
            .filter(subjects::Column::Code.eq(req.code.clone()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询科目失败: {e}")))?;

        if existing.is_some() {
            return Err(SchoolLmsError::conflict(format!(
                "科目代码已存在: {}",
                req.code
            )));
        }

        let model = subjects::ActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 分页列出科目
    pub async fn list_subjects_impl(&self, query: OrgListQuery) -> Result<SubjectListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = subjects::Entity::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(subjects::Column::SchoolId.eq(school_id));
        }

        if !query.include_inactive {
            select = select.filter(subjects::Column::IsActive.eq(true));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(subjects::Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(subjects::Column::Code);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询科目总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询科目页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("查询科目列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_subject())
            .collect();

        Ok(SubjectListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
