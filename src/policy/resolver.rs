//! 策略上下文解析
//!
//! 按角色把用户的档案关联（学生档案、子女链接、任课信息等）
//! 解析成 [`PolicyContext`]，每个请求解析一次。

use std::sync::Arc;

use super::context::{PolicyContext, RoleLinkage};
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

pub struct PolicyResolver;

impl PolicyResolver {
    /// 解析用户的策略上下文
    ///
    /// 角色存在但档案缺失时得到 `Unlinked`（空可见范围），
    /// 而不是报错：档案录入滞后不应导致请求失败。
    pub async fn resolve(storage: &Arc<dyn Storage>, user: &User) -> Result<PolicyContext> {
        let linkage = match user.role {
            UserRole::Developer => RoleLinkage::Developer,
            UserRole::Principal => match storage.get_principal_profile_by_user_id(user.id).await? {
                Some(profile) => RoleLinkage::Principal {
                    school_id: profile.school_id,
                },
                None => RoleLinkage::Unlinked,
            },
            UserRole::Teacher => match storage.get_teacher_profile_by_user_id(user.id).await? {
                Some(profile) => RoleLinkage::Teacher {
                    profile_id: profile.id,
                    school_id: profile.school_id,
                    subject_ids: profile.subject_ids,
                    section_ids: profile.section_ids,
                },
                None => RoleLinkage::Unlinked,
            },
            UserRole::Student => match storage.get_student_profile_by_user_id(user.id).await? {
                Some(profile) => RoleLinkage::Student {
                    profile_id: profile.id,
                    school_id: profile.school_id,
                    class_id: profile.class_id,
                    section_id: profile.section_id,
                },
                None => RoleLinkage::Unlinked,
            },
            UserRole::Parent => match storage.get_parent_profile_by_user_id(user.id).await? {
                Some(profile) => {
                    let children = storage.list_parent_children_links(profile.id).await?;
                    RoleLinkage::Parent {
                        profile_id: profile.id,
                        school_id: profile.school_id,
                        children,
                    }
                }
                None => RoleLinkage::Unlinked,
            },
        };

        Ok(PolicyContext {
            user_id: user.id,
            role: user.role,
            linkage,
        })
    }
}
