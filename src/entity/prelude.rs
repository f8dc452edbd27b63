pub use super::assignment_submissions::Entity as AssignmentSubmissions;
pub use super::assignments::Entity as Assignments;
pub use super::attendance_records::Entity as AttendanceRecords;
pub use super::attendance_summaries::Entity as AttendanceSummaries;
pub use super::behavior_categories::Entity as BehaviorCategories;
pub use super::behavior_logs::Entity as BehaviorLogs;
pub use super::classes::Entity as Classes;
pub use super::exams::Entity as Exams;
pub use super::fee_payments::Entity as FeePayments;
pub use super::fee_records::Entity as FeeRecords;
pub use super::fee_structures::Entity as FeeStructures;
pub use super::files::Entity as Files;
pub use super::marks::Entity as Marks;
pub use super::message_reads::Entity as MessageReads;
pub use super::message_recipients::Entity as MessageRecipients;
pub use super::messages::Entity as Messages;
pub use super::notice_classes::Entity as NoticeClasses;
pub use super::notices::Entity as Notices;
pub use super::parent_children::Entity as ParentChildren;
pub use super::parent_profiles::Entity as ParentProfiles;
pub use super::principal_profiles::Entity as PrincipalProfiles;
pub use super::schools::Entity as Schools;
pub use super::sections::Entity as Sections;
pub use super::student_profiles::Entity as StudentProfiles;
pub use super::subjects::Entity as Subjects;
pub use super::teacher_profiles::Entity as TeacherProfiles;
pub use super::teacher_sections::Entity as TeacherSections;
pub use super::teacher_subjects::Entity as TeacherSubjects;
pub use super::timetable_slots::Entity as TimetableSlots;
pub use super::users::Entity as Users;
