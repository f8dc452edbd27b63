use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建学校请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateSchoolRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// 更新学校请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateClassRequest {
    pub school_id: i64,
    pub name: String,
    pub grade_level: i32,
}

/// 创建分班请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateSectionRequest {
    pub class_id: i64,
    pub name: String,
    pub homeroom_teacher_id: Option<i64>,
    pub max_capacity: Option<i32>,
}

/// 更新分班请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub homeroom_teacher_id: Option<i64>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// 创建科目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateSubjectRequest {
    pub school_id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

/// 创建教师档案请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateTeacherProfileRequest {
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
    #[serde(default)]
    pub section_ids: Vec<i64>,
}

/// 更新教师任课/分管信息
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct UpdateTeacherProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject_ids: Option<Vec<i64>>,
    pub section_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

/// 创建学生档案请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateStudentProfileRequest {
    pub user_id: i64,
    pub school_id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: i64,
    pub section_id: i64,
    pub roll_number: Option<String>,
    pub admission_date: chrono::NaiveDate,
}

/// 更新学生档案请求（转班等）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct UpdateStudentProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub roll_number: Option<String>,
    pub is_active: Option<bool>,
}

/// 创建家长档案请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreateParentProfileRequest {
    pub user_id: i64,
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    /// 子女学生档案 ID；首个为主监护关系
    #[serde(default)]
    pub children_ids: Vec<i64>,
}

/// 创建校长档案请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct CreatePrincipalProfileRequest {
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// 组织结构通用列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct OrgListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<i64>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
    /// 管理角色可显式包含已停用条目
    pub include_inactive: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct OrgListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_id: Option<i64>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
    pub include_inactive: bool,
}

impl From<OrgListParams> for OrgListQuery {
    fn from(params: OrgListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            school_id: params.school_id,
            class_id: params.class_id,
            search: params.search,
            include_inactive: params.include_inactive.unwrap_or(false),
        }
    }
}
