//! 策略上下文：请求主体的角色与档案关联
//!
//! 每个请求解析一次，之后显式传入各策略/查询调用，
//! 不使用线程局部或框架注入的隐式状态。

use super::scope::Scope;
use super::ResourceKind;
use crate::models::users::entities::UserRole;

/// 家长与子女的关联
#[derive(Debug, Clone, PartialEq)]
pub struct ChildLink {
    pub student_id: i64,
    pub class_id: i64,
    pub section_id: i64,
    /// 是否主监护人（配置 primary_guardian_only 时生效）
    pub is_primary: bool,
}

/// 角色档案关联
#[derive(Debug, Clone, PartialEq)]
pub enum RoleLinkage {
    Developer,
    Principal {
        school_id: i64,
    },
    Teacher {
        profile_id: i64,
        school_id: i64,
        subject_ids: Vec<i64>,
        section_ids: Vec<i64>,
    },
    Student {
        profile_id: i64,
        school_id: i64,
        class_id: i64,
        section_id: i64,
    },
    Parent {
        profile_id: i64,
        school_id: i64,
        children: Vec<ChildLink>,
    },
    /// 角色存在但档案缺失（数据不完整），可见范围一律为空
    Unlinked,
}

/// 请求主体的策略上下文
#[derive(Debug, Clone)]
pub struct PolicyContext {
    pub user_id: i64,
    pub role: UserRole,
    pub linkage: RoleLinkage,
}

impl PolicyContext {
    /// 主体所属学校（开发者无租户归属）
    pub fn school_id(&self) -> Option<i64> {
        match &self.linkage {
            RoleLinkage::Developer | RoleLinkage::Unlinked => None,
            RoleLinkage::Principal { school_id }
            | RoleLinkage::Teacher { school_id, .. }
            | RoleLinkage::Student { school_id, .. }
            | RoleLinkage::Parent { school_id, .. } => Some(*school_id),
        }
    }

    /// 家长可见的子女（按配置裁剪主监护）
    fn visible_children(&self, primary_only: bool) -> Vec<&ChildLink> {
        match &self.linkage {
            RoleLinkage::Parent { children, .. } => children
                .iter()
                .filter(|child| !primary_only || child.is_primary)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 求 (主体, 资源) 的可见范围
    ///
    /// 对照表（与角色策略表逐行对应）：
    /// - 开发者：全量
    /// - 校长：本校全量
    /// - 教师：考试/成绩按 所教科目 OR 分管分班；考勤/行为按 本人录入 OR
    ///   分管分班；作业按创建者；提交经作业归属；课程表按任课教师
    /// - 学生：仅本人记录；班级资源按本人 (班级, 分班)
    /// - 家长：子女记录并集；班级资源按子女 (班级, 分班) 并集
    ///
    /// `primary_guardian_only` 为 true 时家长只见主监护子女。
    pub fn scope(&self, kind: ResourceKind, primary_guardian_only: bool) -> Scope {
        match &self.linkage {
            RoleLinkage::Developer => Scope::All,
            RoleLinkage::Unlinked => Scope::Nothing,
            RoleLinkage::Principal { school_id } => match kind {
                // 消息始终按参与者过滤，校长也不例外
                ResourceKind::Message => Scope::Participant(self.user_id),
                _ => Scope::School(*school_id),
            },
            RoleLinkage::Teacher {
                profile_id,
                school_id,
                subject_ids,
                section_ids,
            } => match kind {
                ResourceKind::Exam | ResourceKind::Mark => Scope::SubjectsOrSections {
                    subject_ids: subject_ids.clone(),
                    section_ids: section_ids.clone(),
                },
                ResourceKind::AttendanceRecord | ResourceKind::BehaviorLog => {
                    Scope::OwnerOrSections {
                        user_id: self.user_id,
                        section_ids: section_ids.clone(),
                    }
                }
                ResourceKind::Assignment => Scope::Owner(self.user_id),
                ResourceKind::Submission => Scope::AssignmentOwner(self.user_id),
                ResourceKind::Timetable => Scope::Owner(*profile_id),
                ResourceKind::Notice => Scope::School(*school_id),
                ResourceKind::BehaviorCategory | ResourceKind::FeeStructure => {
                    Scope::School(*school_id)
                }
                // 教师对费用数据 can() 已拒绝；范围兜底为空
                ResourceKind::FeeRecord => Scope::Nothing,
                ResourceKind::Message => Scope::Participant(self.user_id),
            },
            RoleLinkage::Student {
                profile_id,
                school_id,
                class_id,
                section_id,
            } => match kind {
                ResourceKind::Mark
                | ResourceKind::AttendanceRecord
                | ResourceKind::Submission
                | ResourceKind::FeeRecord
                | ResourceKind::BehaviorLog => Scope::OwnStudent(*profile_id),
                ResourceKind::Exam | ResourceKind::Assignment | ResourceKind::Timetable => {
                    Scope::ClassSections(vec![(*class_id, *section_id)])
                }
                ResourceKind::Notice => Scope::NoticeAudience {
                    school_id: *school_id,
                    class_ids: vec![*class_id],
                },
                ResourceKind::BehaviorCategory | ResourceKind::FeeStructure => {
                    Scope::School(*school_id)
                }
                ResourceKind::Message => Scope::Participant(self.user_id),
            },
            RoleLinkage::Parent { school_id, .. } => {
                let children = self.visible_children(primary_guardian_only);
                if children.is_empty() {
                    // 没有子女：空范围是合法结果，不是 403
                    return match kind {
                        ResourceKind::Message => Scope::Participant(self.user_id),
                        _ => Scope::Nothing,
                    };
                }
                match kind {
                    ResourceKind::Mark
                    | ResourceKind::AttendanceRecord
                    | ResourceKind::Submission
                    | ResourceKind::FeeRecord
                    | ResourceKind::BehaviorLog => {
                        Scope::Students(children.iter().map(|c| c.student_id).collect())
                    }
                    ResourceKind::Exam | ResourceKind::Assignment | ResourceKind::Timetable => {
                        Scope::ClassSections(
                            children
                                .iter()
                                .map(|c| (c.class_id, c.section_id))
                                .collect(),
                        )
                    }
                    ResourceKind::Notice => Scope::NoticeAudience {
                        school_id: *school_id,
                        class_ids: children.iter().map(|c| c.class_id).collect(),
                    },
                    ResourceKind::BehaviorCategory | ResourceKind::FeeStructure => {
                        Scope::School(*school_id)
                    }
                    ResourceKind::Message => Scope::Participant(self.user_id),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScopeTarget;

    fn teacher_ctx() -> PolicyContext {
        PolicyContext {
            user_id: 20,
            role: UserRole::Teacher,
            linkage: RoleLinkage::Teacher {
                profile_id: 2,
                school_id: 1,
                subject_ids: vec![5],
                section_ids: vec![100],
            },
        }
    }

    fn student_ctx(profile_id: i64, class_id: i64, section_id: i64) -> PolicyContext {
        PolicyContext {
            user_id: 30 + profile_id,
            role: UserRole::Student,
            linkage: RoleLinkage::Student {
                profile_id,
                school_id: 1,
                class_id,
                section_id,
            },
        }
    }

    #[test]
    fn test_teacher_exam_scope_is_subject_or_section() {
        let scope = teacher_ctx().scope(ResourceKind::Exam, false);
        assert_eq!(
            scope,
            Scope::SubjectsOrSections {
                subject_ids: vec![5],
                section_ids: vec![100],
            }
        );
    }

    #[test]
    fn test_teacher_assignment_scope_is_ownership_only() {
        // 作业与考试不同：只按创建者过滤，不含分管分班
        let scope = teacher_ctx().scope(ResourceKind::Assignment, false);
        assert_eq!(scope, Scope::Owner(20));
    }

    #[test]
    fn test_exam_visibility_scenario() {
        // 教师 A（分管分班 S=100，教科目 M=5）创建了 (班级 C=10, 分班 S, 科目 M) 的考试：
        // 同分班学生 X 可见，另一分班学生 Y 不可见
        let exam = ScopeTarget {
            school_id: Some(1),
            class_id: Some(10),
            section_id: Some(100),
            subject_id: Some(5),
            ..Default::default()
        };

        let student_x = student_ctx(7, 10, 100);
        assert!(student_x.scope(ResourceKind::Exam, false).matches(&exam));

        let student_y = student_ctx(8, 10, 101);
        assert!(!student_y.scope(ResourceKind::Exam, false).matches(&exam));

        // 教师本人按科目/分班也可见
        assert!(teacher_ctx().scope(ResourceKind::Exam, false).matches(&exam));
    }

    #[test]
    fn test_parent_union_across_children() {
        let parent = PolicyContext {
            user_id: 40,
            role: UserRole::Parent,
            linkage: RoleLinkage::Parent {
                profile_id: 4,
                school_id: 1,
                children: vec![
                    ChildLink {
                        student_id: 7,
                        class_id: 10,
                        section_id: 100,
                        is_primary: true,
                    },
                    ChildLink {
                        student_id: 8,
                        class_id: 11,
                        section_id: 110,
                        is_primary: false,
                    },
                ],
            },
        };

        let scope = parent.scope(ResourceKind::AttendanceRecord, false);
        assert_eq!(scope, Scope::Students(vec![7, 8]));

        // 主监护模式只剩第一个子女
        let primary_scope = parent.scope(ResourceKind::AttendanceRecord, true);
        assert_eq!(primary_scope, Scope::Students(vec![7]));
    }

    #[test]
    fn test_parent_without_children_gets_empty_scope() {
        let parent = PolicyContext {
            user_id: 41,
            role: UserRole::Parent,
            linkage: RoleLinkage::Parent {
                profile_id: 5,
                school_id: 1,
                children: vec![],
            },
        };
        // 空范围，不是拒绝：列表合法地返回零条
        assert_eq!(
            parent.scope(ResourceKind::Mark, false),
            Scope::Nothing
        );
    }

    #[test]
    fn test_principal_is_school_scoped() {
        let principal = PolicyContext {
            user_id: 50,
            role: UserRole::Principal,
            linkage: RoleLinkage::Principal { school_id: 1 },
        };
        assert_eq!(
            principal.scope(ResourceKind::Exam, false),
            Scope::School(1)
        );

        let other_school = ScopeTarget {
            school_id: Some(2),
            class_id: Some(10),
            section_id: Some(100),
            ..Default::default()
        };
        assert!(!principal
            .scope(ResourceKind::Exam, false)
            .matches(&other_school));
    }

    #[test]
    fn test_developer_sees_all() {
        let developer = PolicyContext {
            user_id: 1,
            role: UserRole::Developer,
            linkage: RoleLinkage::Developer,
        };
        assert_eq!(developer.scope(ResourceKind::FeeRecord, false), Scope::All);
    }
}
