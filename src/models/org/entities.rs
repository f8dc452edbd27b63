//! 组织结构实体：学校 → 班级 → 分班 → 科目，以及角色档案。
//!
//! 学校是多租户边界：任何实体引用都不得跨校。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学校（租户）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 班级（年级），如 "Grade 1"
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct Class {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub grade_level: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 分班（班级内的 A/B/C 班）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct Section {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
    /// 班主任（教师档案 ID）
    pub homeroom_teacher_id: Option<i64>,
    pub max_capacity: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct Subject {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    /// 校内唯一的科目代码
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct TeacherProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    /// 所教科目
    pub subject_ids: Vec<i64>,
    /// 分管分班
    pub section_ids: Vec<i64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct StudentProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: i64,
    /// 所在分班，必须隶属于 class_id
    pub section_id: i64,
    pub roll_number: Option<String>,
    pub admission_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 家长档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct ParentProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    /// 子女（学生档案 ID），一个学生可关联多位家长
    pub children_ids: Vec<i64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 校长档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct PrincipalProfile {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl StudentProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl TeacherProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
