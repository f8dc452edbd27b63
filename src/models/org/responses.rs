use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::org::entities::{
    Class, ParentProfile, School, Section, StudentProfile, Subject, TeacherProfile,
};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct SchoolListResponse {
    pub items: Vec<School>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct ClassListResponse {
    pub items: Vec<Class>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct SectionListResponse {
    pub items: Vec<Section>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct TeacherProfileListResponse {
    pub items: Vec<TeacherProfile>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct StudentProfileListResponse {
    pub items: Vec<StudentProfile>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/org.ts")]
pub struct ParentProfileListResponse {
    pub items: Vec<ParentProfile>,
    pub pagination: PaginationInfo,
}
