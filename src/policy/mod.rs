//! 访问策略评估器
//!
//! 角色可见性与写权限的唯一事实来源。所有领域模块的查询都先经过
//! 这里求出 (是否允许, 可见范围)，再由存储层把 Scope 翻译成查询条件。
//!
//! 约定：
//! - `can` 返回 false 时一律响应 403，与"范围为空"严格区分
//!   （家长没有子女时看到空列表，而不是被拒绝）。
//! - 范围外的 ID 与不存在的 ID 同样返回 404，不泄露存在性。
//! - 策略是 actor.role 与静态表的纯函数，不做任何 IO。

mod context;
mod resolver;
mod scope;

pub use context::{ChildLink, PolicyContext, RoleLinkage};
pub use resolver::PolicyResolver;
pub use scope::{Scope, ScopeTarget};

use crate::models::users::entities::UserRole;

/// 资源操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// 受策略管控的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Exam,
    Mark,
    Timetable,
    AttendanceRecord,
    Assignment,
    Submission,
    FeeStructure,
    FeeRecord,
    Notice,
    BehaviorCategory,
    BehaviorLog,
    Message,
}

/// 写权限表：每个 (资源, 操作) 对应一组允许的角色。
///
/// 读权限默认放开给全部角色（可见范围由 scope 收窄），唯一例外是
/// 教师对费用数据没有任何访问权。
fn allowed_roles(kind: ResourceKind, action: Action) -> &'static [UserRole] {
    use Action::*;
    use ResourceKind::*;
    use UserRole::*;

    const ALL: &[UserRole] = &[Developer, Principal, Teacher, Student, Parent];
    const STAFF: &[UserRole] = &[Developer, Principal, Teacher];
    const MANAGEMENT: &[UserRole] = &[Developer, Principal];
    const STUDENT_ONLY: &[UserRole] = &[Student];
    const NO_TEACHER: &[UserRole] = &[Developer, Principal, Student, Parent];

    match (kind, action) {
        (Exam | Mark | Timetable | AttendanceRecord | Assignment | Notice | BehaviorLog, Read) => {
            ALL
        }
        (Exam | Mark | Timetable | AttendanceRecord | Assignment | Notice | BehaviorLog, _) => {
            STAFF
        }

        // 提交：仅学生本人创建；查看放开；批改（更新）与删除归教学人员
        (Submission, Create) => STUDENT_ONLY,
        (Submission, Read) => ALL,
        (Submission, _) => STAFF,

        // 费用：管理角色维护，教师完全无权访问
        (FeeStructure | FeeRecord, Read) => NO_TEACHER,
        (FeeStructure | FeeRecord, _) => MANAGEMENT,

        // 行为类别由校级管理维护
        (BehaviorCategory, Read) => ALL,
        (BehaviorCategory, _) => MANAGEMENT,

        // 站内信人人可发可读，不可改写历史
        (Message, Create | Read) => ALL,
        (Message, _) => MANAGEMENT,
    }
}

/// 判断角色能否对某类资源执行某操作
///
/// actor.role 与静态表的纯函数。
pub fn can(role: UserRole, kind: ResourceKind, action: Action) -> bool {
    allowed_roles(kind, action).contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserRole::*;

    #[test]
    fn test_exam_write_restricted_to_staff() {
        assert!(can(Teacher, ResourceKind::Exam, Action::Create));
        assert!(can(Principal, ResourceKind::Exam, Action::Create));
        assert!(can(Developer, ResourceKind::Exam, Action::Delete));
        assert!(!can(Student, ResourceKind::Exam, Action::Create));
        assert!(!can(Parent, ResourceKind::Exam, Action::Update));
    }

    #[test]
    fn test_everyone_reads_academic_records() {
        for role in [Developer, Principal, Teacher, Student, Parent] {
            assert!(can(role, ResourceKind::Exam, Action::Read));
            assert!(can(role, ResourceKind::Mark, Action::Read));
            assert!(can(role, ResourceKind::Assignment, Action::Read));
        }
    }

    #[test]
    fn test_submission_create_is_student_only() {
        assert!(can(Student, ResourceKind::Submission, Action::Create));
        assert!(!can(Teacher, ResourceKind::Submission, Action::Create));
        assert!(!can(Parent, ResourceKind::Submission, Action::Create));
        // 批改走 Update，归教学人员
        assert!(can(Teacher, ResourceKind::Submission, Action::Update));
        assert!(!can(Student, ResourceKind::Submission, Action::Update));
    }

    #[test]
    fn test_fees_managed_by_management_and_hidden_from_teachers() {
        assert!(can(Principal, ResourceKind::FeeRecord, Action::Create));
        assert!(can(Developer, ResourceKind::FeeStructure, Action::Update));
        assert!(!can(Teacher, ResourceKind::FeeRecord, Action::Create));
        // 教师连读都不允许：这是 403，而不是空结果
        assert!(!can(Teacher, ResourceKind::FeeRecord, Action::Read));
        assert!(can(Student, ResourceKind::FeeRecord, Action::Read));
        assert!(can(Parent, ResourceKind::FeeRecord, Action::Read));
    }

    #[test]
    fn test_attendance_marking_restricted() {
        assert!(can(Teacher, ResourceKind::AttendanceRecord, Action::Create));
        assert!(!can(Student, ResourceKind::AttendanceRecord, Action::Create));
        assert!(!can(Parent, ResourceKind::AttendanceRecord, Action::Create));
    }

    #[test]
    fn test_messages_open_to_all() {
        for role in [Developer, Principal, Teacher, Student, Parent] {
            assert!(can(role, ResourceKind::Message, Action::Create));
            assert!(can(role, ResourceKind::Message, Action::Read));
        }
    }
}
