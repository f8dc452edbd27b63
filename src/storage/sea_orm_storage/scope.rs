//! 可见范围到查询条件的翻译
//!
//! 每类资源一个翻译函数：把策略层的 [`Scope`] 变成该资源表上的
//! SeaORM Condition，列表接口用它与显式筛选条件合取。
//! 资源不支持的范围变体一律翻译为恒假条件（空结果，而非放行）。

use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition, ExprTrait};

use crate::entity::{
    assignment_submissions, assignments, attendance_records, attendance_summaries, behavior_logs,
    exams, fee_records, marks, message_recipients, messages, notice_classes, notices,
    student_profiles, timetable_slots,
};
use crate::policy::Scope;

/// 恒假条件
fn never() -> Condition {
    Condition::all().add(Expr::val(1).eq(0))
}

/// (class_id, section_id) 组合的析取条件
fn class_section_pairs<C: ColumnTrait>(
    class_col: C,
    section_col: C,
    pairs: &[(i64, i64)],
) -> Condition {
    if pairs.is_empty() {
        return never();
    }
    let mut cond = Condition::any();
    for (class_id, section_id) in pairs {
        cond = cond.add(
            Condition::all()
                .add(class_col.eq(*class_id))
                .add(section_col.eq(*section_id)),
        );
    }
    cond
}

/// 考试表
pub(crate) fn exam_scope_condition(scope: &Scope) -> Condition {
    use exams::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::ClassSections(pairs) => {
            class_section_pairs(Column::ClassId, Column::SectionId, pairs)
        }
        Scope::SubjectsOrSections {
            subject_ids,
            section_ids,
        } => {
            if subject_ids.is_empty() && section_ids.is_empty() {
                return never();
            }
            let mut cond = Condition::any();
            if !subject_ids.is_empty() {
                cond = cond.add(Column::SubjectId.is_in(subject_ids.clone()));
            }
            if !section_ids.is_empty() {
                cond = cond.add(Column::SectionId.is_in(section_ids.clone()));
            }
            cond
        }
        Scope::Owner(user_id) => Condition::all().add(Column::CreatedBy.eq(*user_id)),
        Scope::And(lhs, rhs) => Condition::all()
            .add(exam_scope_condition(lhs))
            .add(exam_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(exam_scope_condition(lhs))
            .add(exam_scope_condition(rhs)),
        _ => never(),
    }
}

/// 成绩表
///
/// 成绩本身只有 student_id / exam_id，按学校或科目/分班过滤时
/// 经 exams 子查询收窄。
pub(crate) fn mark_scope_condition(scope: &Scope) -> Condition {
    use marks::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::School(school_id) => Condition::all().add(
            Column::ExamId.in_subquery(
                Query::select()
                    .column(exams::Column::Id)
                    .from(exams::Entity)
                    .and_where(Expr::col(exams::Column::SchoolId).eq(*school_id))
                    .to_owned(),
            ),
        ),
        Scope::SubjectsOrSections {
            subject_ids,
            section_ids,
        } => {
            if subject_ids.is_empty() && section_ids.is_empty() {
                return never();
            }
            let mut inner = Condition::any();
            if !subject_ids.is_empty() {
                inner = inner.add(exams::Column::SubjectId.is_in(subject_ids.clone()));
            }
            if !section_ids.is_empty() {
                inner = inner.add(exams::Column::SectionId.is_in(section_ids.clone()));
            }
            Condition::all().add(
                Column::ExamId.in_subquery(
                    Query::select()
                        .column(exams::Column::Id)
                        .from(exams::Entity)
                        .cond_where(inner)
                        .to_owned(),
                ),
            )
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(mark_scope_condition(lhs))
            .add(mark_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(mark_scope_condition(lhs))
            .add(mark_scope_condition(rhs)),
        _ => never(),
    }
}

/// 课程表
pub(crate) fn timetable_scope_condition(scope: &Scope) -> Condition {
    use timetable_slots::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::ClassSections(pairs) => {
            class_section_pairs(Column::ClassId, Column::SectionId, pairs)
        }
        // 教师视角：自己任课的条目
        Scope::Owner(teacher_id) => Condition::all().add(Column::TeacherId.eq(*teacher_id)),
        Scope::And(lhs, rhs) => Condition::all()
            .add(timetable_scope_condition(lhs))
            .add(timetable_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(timetable_scope_condition(lhs))
            .add(timetable_scope_condition(rhs)),
        _ => never(),
    }
}

/// 考勤记录表
pub(crate) fn attendance_scope_condition(scope: &Scope) -> Condition {
    use attendance_records::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::OwnerOrSections {
            user_id,
            section_ids,
        } => {
            let mut cond = Condition::any().add(Column::MarkedBy.eq(*user_id));
            if !section_ids.is_empty() {
                cond = cond.add(Column::SectionId.is_in(section_ids.clone()));
            }
            cond
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(attendance_scope_condition(lhs))
            .add(attendance_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(attendance_scope_condition(lhs))
            .add(attendance_scope_condition(rhs)),
        _ => never(),
    }
}

/// 月度考勤汇总表（只有 student_id，按学校/分班经学生档案子查询）
pub(crate) fn attendance_summary_scope_condition(scope: &Scope) -> Condition {
    use attendance_summaries::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::School(school_id) => Condition::all().add(
            Column::StudentId.in_subquery(
                Query::select()
                    .column(student_profiles::Column::Id)
                    .from(student_profiles::Entity)
                    .and_where(Expr::col(student_profiles::Column::SchoolId).eq(*school_id))
                    .to_owned(),
            ),
        ),
        Scope::OwnerOrSections { section_ids, .. } => {
            if section_ids.is_empty() {
                return never();
            }
            Condition::all().add(
                Column::StudentId.in_subquery(
                    Query::select()
                        .column(student_profiles::Column::Id)
                        .from(student_profiles::Entity)
                        .and_where(
                            Expr::col(student_profiles::Column::SectionId)
                                .is_in(section_ids.clone()),
                        )
                        .to_owned(),
                ),
            )
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(attendance_summary_scope_condition(lhs))
            .add(attendance_summary_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(attendance_summary_scope_condition(lhs))
            .add(attendance_summary_scope_condition(rhs)),
        _ => never(),
    }
}

/// 作业表
pub(crate) fn assignment_scope_condition(scope: &Scope) -> Condition {
    use assignments::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::ClassSections(pairs) => {
            class_section_pairs(Column::ClassId, Column::SectionId, pairs)
        }
        // 教师只看自己创建的作业（与考试的 科目 OR 分班 语义不同）
        Scope::Owner(user_id) => Condition::all().add(Column::TeacherId.eq(*user_id)),
        Scope::And(lhs, rhs) => Condition::all()
            .add(assignment_scope_condition(lhs))
            .add(assignment_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(assignment_scope_condition(lhs))
            .add(assignment_scope_condition(rhs)),
        _ => never(),
    }
}

/// 作业提交表
pub(crate) fn submission_scope_condition(scope: &Scope) -> Condition {
    use assignment_submissions::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::AssignmentOwner(user_id) => Condition::all().add(
            Column::AssignmentId.in_subquery(
                Query::select()
                    .column(assignments::Column::Id)
                    .from(assignments::Entity)
                    .and_where(Expr::col(assignments::Column::TeacherId).eq(*user_id))
                    .to_owned(),
            ),
        ),
        Scope::School(school_id) => Condition::all().add(
            Column::AssignmentId.in_subquery(
                Query::select()
                    .column(assignments::Column::Id)
                    .from(assignments::Entity)
                    .and_where(Expr::col(assignments::Column::SchoolId).eq(*school_id))
                    .to_owned(),
            ),
        ),
        Scope::And(lhs, rhs) => Condition::all()
            .add(submission_scope_condition(lhs))
            .add(submission_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(submission_scope_condition(lhs))
            .add(submission_scope_condition(rhs)),
        _ => never(),
    }
}

/// 缴费记录表
pub(crate) fn fee_record_scope_condition(scope: &Scope) -> Condition {
    use fee_records::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(fee_record_scope_condition(lhs))
            .add(fee_record_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(fee_record_scope_condition(lhs))
            .add(fee_record_scope_condition(rhs)),
        _ => never(),
    }
}

/// 通知表
///
/// 受众语义：全校通知（无目标班级）对本校所有人可见；
/// 定向通知只对目标班级相关的学生/家长可见。
pub(crate) fn notice_scope_condition(scope: &Scope) -> Condition {
    use notices::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::NoticeAudience {
            school_id,
            class_ids,
        } => {
            // 全校通知：notice_classes 中没有任何关联行
            let school_wide = Condition::all().add(
                Column::Id.not_in_subquery(
                    Query::select()
                        .column(notice_classes::Column::NoticeId)
                        .from(notice_classes::Entity)
                        .to_owned(),
                ),
            );
            let mut audience = Condition::any().add(school_wide);
            if !class_ids.is_empty() {
                audience = audience.add(
                    Column::Id.in_subquery(
                        Query::select()
                            .column(notice_classes::Column::NoticeId)
                            .from(notice_classes::Entity)
                            .and_where(
                                Expr::col(notice_classes::Column::ClassId)
                                    .is_in(class_ids.clone()),
                            )
                            .to_owned(),
                    ),
                );
            }
            Condition::all()
                .add(Column::SchoolId.eq(*school_id))
                .add(audience)
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(notice_scope_condition(lhs))
            .add(notice_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(notice_scope_condition(lhs))
            .add(notice_scope_condition(rhs)),
        _ => never(),
    }
}

/// 行为记录表
pub(crate) fn behavior_log_scope_condition(scope: &Scope) -> Condition {
    use behavior_logs::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::OwnStudent(student_id) => Condition::all().add(Column::StudentId.eq(*student_id)),
        Scope::Students(ids) => {
            if ids.is_empty() {
                return never();
            }
            Condition::all().add(Column::StudentId.is_in(ids.clone()))
        }
        Scope::OwnerOrSections {
            user_id,
            section_ids,
        } => {
            let mut cond = Condition::any().add(Column::ReportedBy.eq(*user_id));
            if !section_ids.is_empty() {
                cond = cond.add(
                    Column::StudentId.in_subquery(
                        Query::select()
                            .column(student_profiles::Column::Id)
                            .from(student_profiles::Entity)
                            .and_where(
                                Expr::col(student_profiles::Column::SectionId)
                                    .is_in(section_ids.clone()),
                            )
                            .to_owned(),
                    ),
                );
            }
            cond
        }
        Scope::And(lhs, rhs) => Condition::all()
            .add(behavior_log_scope_condition(lhs))
            .add(behavior_log_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(behavior_log_scope_condition(lhs))
            .add(behavior_log_scope_condition(rhs)),
        _ => never(),
    }
}

/// 消息表（参与者 = 发件人或收件人）
pub(crate) fn message_scope_condition(scope: &Scope) -> Condition {
    use messages::Column;
    match scope {
        Scope::All => Condition::all(),
        Scope::Nothing => never(),
        Scope::School(school_id) => Condition::all().add(Column::SchoolId.eq(*school_id)),
        Scope::Participant(user_id) => Condition::any()
            .add(Column::SenderId.eq(*user_id))
            .add(
                Column::Id.in_subquery(
                    Query::select()
                        .column(message_recipients::Column::MessageId)
                        .from(message_recipients::Entity)
                        .and_where(Expr::col(message_recipients::Column::UserId).eq(*user_id))
                        .to_owned(),
                ),
            ),
        Scope::And(lhs, rhs) => Condition::all()
            .add(message_scope_condition(lhs))
            .add(message_scope_condition(rhs)),
        Scope::Or(lhs, rhs) => Condition::any()
            .add(message_scope_condition(lhs))
            .add(message_scope_condition(rhs)),
        _ => never(),
    }
}
