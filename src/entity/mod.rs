//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignment_submissions;
pub mod assignments;
pub mod attendance_records;
pub mod attendance_summaries;
pub mod behavior_categories;
pub mod behavior_logs;
pub mod classes;
pub mod exams;
pub mod fee_payments;
pub mod fee_records;
pub mod fee_structures;
pub mod files;
pub mod marks;
pub mod message_reads;
pub mod message_recipients;
pub mod messages;
pub mod notice_classes;
pub mod notices;
pub mod parent_children;
pub mod parent_profiles;
pub mod principal_profiles;
pub mod schools;
pub mod sections;
pub mod student_profiles;
pub mod subjects;
pub mod teacher_profiles;
pub mod teacher_sections;
pub mod teacher_subjects;
pub mod timetable_slots;
pub mod users;
