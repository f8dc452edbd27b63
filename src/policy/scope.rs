//! 可见范围谓词
//!
//! Scope 是声明式的过滤条件，支持 And/Or 组合，由两个解释器消费：
//! - 存储层把它翻译成 SeaORM 查询条件（列表接口）；
//! - [`Scope::matches`] 在内存中对单条记录求值（详情接口、单测）。

/// 可见范围
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// 不加任何限制（开发者）
    All,
    /// 限定学校（校长）
    School(i64),
    /// 限定单个学生档案（学生本人）
    OwnStudent(i64),
    /// 限定一组学生档案（家长的子女并集）
    Students(Vec<i64>),
    /// 限定 (班级, 分班) 组合（学生/家长视角的班级资源）
    ClassSections(Vec<(i64, i64)>),
    /// 限定记录归属人（创建者/录入者等于该用户）
    Owner(i64),
    /// 所教科目或分管分班，OR 语义（教师看考试/成绩）
    SubjectsOrSections {
        subject_ids: Vec<i64>,
        section_ids: Vec<i64>,
    },
    /// 归属人或分管分班，OR 语义（教师看考勤/行为记录）
    OwnerOrSections {
        user_id: i64,
        section_ids: Vec<i64>,
    },
    /// 作业归属人（教师看自己作业下的提交，经 assignment 关联）
    AssignmentOwner(i64),
    /// 消息参与者（发件人或收件人）
    Participant(i64),
    /// 通知受众：全校通知，或目标班级与给定班级有交集
    NoticeAudience {
        school_id: i64,
        class_ids: Vec<i64>,
    },
    /// 恒假（如家长没有任何子女）——合法的空结果，不是拒绝
    Nothing,
    /// 合取组合
    And(Box<Scope>, Box<Scope>),
    /// 析取组合
    Or(Box<Scope>, Box<Scope>),
}

impl Scope {
    pub fn and(self, other: Scope) -> Scope {
        match (self, other) {
            (Scope::All, rhs) => rhs,
            (lhs, Scope::All) => lhs,
            (Scope::Nothing, _) | (_, Scope::Nothing) => Scope::Nothing,
            (lhs, rhs) => Scope::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    pub fn or(self, other: Scope) -> Scope {
        match (self, other) {
            (Scope::All, _) | (_, Scope::All) => Scope::All,
            (Scope::Nothing, rhs) => rhs,
            (lhs, Scope::Nothing) => lhs,
            (lhs, rhs) => Scope::Or(Box::new(lhs), Box::new(rhs)),
        }
    }
}

/// 记录属性视图，供内存求值使用
///
/// 不同资源只填自己有的属性，缺省属性视为不匹配。
#[derive(Debug, Clone, Default)]
pub struct ScopeTarget {
    pub school_id: Option<i64>,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    /// 记录归属人（创建者/录入者/教师）
    pub owner_id: Option<i64>,
    /// 提交所属作业的归属教师
    pub assignment_owner_id: Option<i64>,
    /// 消息参与者（发件人 + 收件人）
    pub participant_ids: Vec<i64>,
    /// 通知目标班级；空表示全校
    pub target_class_ids: Vec<i64>,
}

impl Scope {
    /// 对单条记录求值
    pub fn matches(&self, target: &ScopeTarget) -> bool {
        match self {
            Scope::All => true,
            Scope::Nothing => false,
            Scope::School(school_id) => target.school_id == Some(*school_id),
            Scope::OwnStudent(student_id) => target.student_id == Some(*student_id),
            Scope::Students(ids) => {
                matches!(target.student_id, Some(id) if ids.contains(&id))
            }
            Scope::ClassSections(pairs) => match (target.class_id, target.section_id) {
                (Some(class_id), Some(section_id)) => pairs.contains(&(class_id, section_id)),
                _ => false,
            },
            Scope::Owner(user_id) => target.owner_id == Some(*user_id),
            Scope::SubjectsOrSections {
                subject_ids,
                section_ids,
            } => {
                let subject_hit =
                    matches!(target.subject_id, Some(id) if subject_ids.contains(&id));
                let section_hit =
                    matches!(target.section_id, Some(id) if section_ids.contains(&id));
                subject_hit || section_hit
            }
            Scope::OwnerOrSections {
                user_id,
                section_ids,
            } => {
                target.owner_id == Some(*user_id)
                    || matches!(target.section_id, Some(id) if section_ids.contains(&id))
            }
            Scope::AssignmentOwner(user_id) => target.assignment_owner_id == Some(*user_id),
            Scope::Participant(user_id) => target.participant_ids.contains(user_id),
            Scope::NoticeAudience {
                school_id,
                class_ids,
            } => {
                if target.school_id != Some(*school_id) {
                    return false;
                }
                target.target_class_ids.is_empty()
                    || target
                        .target_class_ids
                        .iter()
                        .any(|id| class_ids.contains(id))
            }
            Scope::And(lhs, rhs) => lhs.matches(target) && rhs.matches(target),
            Scope::Or(lhs, rhs) => lhs.matches(target) || rhs.matches(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam_target(class_id: i64, section_id: i64, subject_id: i64) -> ScopeTarget {
        ScopeTarget {
            school_id: Some(1),
            class_id: Some(class_id),
            section_id: Some(section_id),
            subject_id: Some(subject_id),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_and_nothing() {
        let target = ScopeTarget::default();
        assert!(Scope::All.matches(&target));
        assert!(!Scope::Nothing.matches(&target));
    }

    #[test]
    fn test_class_sections_pair_must_match_both() {
        let scope = Scope::ClassSections(vec![(10, 100)]);
        assert!(scope.matches(&exam_target(10, 100, 5)));
        // 同班不同分班不可见
        assert!(!scope.matches(&exam_target(10, 101, 5)));
        assert!(!scope.matches(&exam_target(11, 100, 5)));
    }

    #[test]
    fn test_subjects_or_sections_has_or_semantics() {
        let scope = Scope::SubjectsOrSections {
            subject_ids: vec![5],
            section_ids: vec![100],
        };
        // 科目命中、分班未命中
        assert!(scope.matches(&exam_target(10, 999, 5)));
        // 分班命中、科目未命中
        assert!(scope.matches(&exam_target(10, 100, 999)));
        // 两者都未命中
        assert!(!scope.matches(&exam_target(10, 999, 999)));
    }

    #[test]
    fn test_and_composition() {
        let scope = Scope::School(1).and(Scope::OwnStudent(7));
        let mut target = ScopeTarget {
            school_id: Some(1),
            student_id: Some(7),
            ..Default::default()
        };
        assert!(scope.matches(&target));
        target.school_id = Some(2);
        assert!(!scope.matches(&target));
    }

    #[test]
    fn test_and_or_identities() {
        assert_eq!(Scope::All.and(Scope::OwnStudent(1)), Scope::OwnStudent(1));
        assert_eq!(Scope::Nothing.and(Scope::OwnStudent(1)), Scope::Nothing);
        assert_eq!(Scope::Nothing.or(Scope::OwnStudent(1)), Scope::OwnStudent(1));
        assert_eq!(Scope::All.or(Scope::OwnStudent(1)), Scope::All);
    }

    #[test]
    fn test_notice_audience() {
        let scope = Scope::NoticeAudience {
            school_id: 1,
            class_ids: vec![10],
        };
        // 全校通知（无目标班级）
        let school_wide = ScopeTarget {
            school_id: Some(1),
            ..Default::default()
        };
        assert!(scope.matches(&school_wide));
        // 目标班级命中
        let targeted = ScopeTarget {
            school_id: Some(1),
            target_class_ids: vec![10, 11],
            ..Default::default()
        };
        assert!(scope.matches(&targeted));
        // 目标班级不含该生班级
        let other = ScopeTarget {
            school_id: Some(1),
            target_class_ids: vec![12],
            ..Default::default()
        };
        assert!(!scope.matches(&other));
        // 跨校不可见
        let cross_school = ScopeTarget {
            school_id: Some(2),
            ..Default::default()
        };
        assert!(!scope.matches(&cross_school));
    }

    #[test]
    fn test_students_union() {
        let scope = Scope::Students(vec![3, 4]);
        let target = ScopeTarget {
            student_id: Some(4),
            ..Default::default()
        };
        assert!(scope.matches(&target));
        let empty = Scope::Students(vec![]);
        assert!(!empty.matches(&target));
    }
}
