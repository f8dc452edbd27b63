use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(ColumnDef::new(Exams::ExamType).string().not_null())
                    .col(ColumnDef::new(Exams::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::SectionId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Date).date().not_null())
                    .col(ColumnDef::new(Exams::StartTime).time().not_null())
                    .col(ColumnDef::new(Exams::EndTime).time().not_null())
                    .col(ColumnDef::new(Exams::MaxMarks).integer().not_null())
                    .col(ColumnDef::new(Exams::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_section_date")
                    .table(Exams::Table)
                    .col(Exams::SectionId)
                    .col(Exams::Date)
                    .to_owned(),
            )
            .await?;

        // 创建成绩表：一个学生对一场考试至多一条成绩
        manager
            .create_table(
                Table::create()
                    .table(Marks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Marks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(Marks::MarksObtained).double().not_null())
                    .col(ColumnDef::new(Marks::GradeLetter).string().not_null())
                    .col(ColumnDef::new(Marks::Remarks).text().null())
                    .col(ColumnDef::new(Marks::GradedBy).big_integer().not_null())
                    .col(ColumnDef::new(Marks::GradedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Marks::Table, Marks::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_marks_student_exam")
                    .table(Marks::Table)
                    .col(Marks::StudentId)
                    .col(Marks::ExamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建课程表：同一分班同一时间只能有一节课
        manager
            .create_table(
                Table::create()
                    .table(TimetableSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimetableSlots::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimetableSlots::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableSlots::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableSlots::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableSlots::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableSlots::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimetableSlots::Weekday).string().not_null())
                    .col(
                        ColumnDef::new(TimetableSlots::WeekdayOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimetableSlots::StartTime).time().not_null())
                    .col(ColumnDef::new(TimetableSlots::EndTime).time().not_null())
                    .col(ColumnDef::new(TimetableSlots::Room).string().null())
                    .col(
                        ColumnDef::new(TimetableSlots::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableSlots::Table, TimetableSlots::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TimetableSlots::Table, TimetableSlots::TeacherId)
                            .to(TeacherProfiles::Table, TeacherProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_timetable_slot")
                    .table(TimetableSlots::Table)
                    .col(TimetableSlots::ClassId)
                    .col(TimetableSlots::SectionId)
                    .col(TimetableSlots::Weekday)
                    .col(TimetableSlots::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建考勤记录表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::SubjectId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Date).date().not_null())
                    .col(ColumnDef::new(AttendanceRecords::Status).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::MarkedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Remarks).text().null())
                    .col(
                        ColumnDef::new(AttendanceRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 自然键唯一约束：并发重复点名由它兜底（last-writer-wins）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_attendance_natural_key")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::StudentId)
                    .col(AttendanceRecords::ClassId)
                    .col(AttendanceRecords::SubjectId)
                    .col(AttendanceRecords::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_student_date")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::StudentId)
                    .col(AttendanceRecords::Date)
                    .to_owned(),
            )
            .await?;

        // 创建月度考勤汇总表（派生数据）
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceSummaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceSummaries::Month).date().not_null())
                    .col(
                        ColumnDef::new(AttendanceSummaries::TotalDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::PresentDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::AbsentDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::LateDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::ExcusedDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::AttendancePercentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_attendance_summary_student_month")
                    .table(AttendanceSummaries::Table)
                    .col(AttendanceSummaries::StudentId)
                    .col(AttendanceSummaries::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::AssignedDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::MaxMarks)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(ColumnDef::new(Assignments::Instructions).text().null())
                    .col(ColumnDef::new(Assignments::AttachmentToken).string().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_teacher")
                    .table(Assignments::Table)
                    .col(Assignments::TeacherId)
                    .to_owned(),
            )
            .await?;

        // 创建作业提交表：一个学生对一份作业至多一条提交
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmissionText)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AttachmentToken)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::MarksObtained)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::TeacherFeedback)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::AssignmentId,
                            )
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::StudentId,
                            )
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_submission_assignment_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::AssignmentId)
                    .col(AssignmentSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建收费标准表
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeeStructures::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeStructures::FeeType).string().not_null())
                    .col(
                        ColumnDef::new(FeeStructures::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::LateFeePercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeStructures::Table, FeeStructures::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建缴费记录表
        manager
            .create_table(
                Table::create()
                    .table(FeeRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeeRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeeRecords::SchoolId).big_integer().not_null())
                    .col(
                        ColumnDef::new(FeeRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::FeeStructureId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::LateFee)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::PaidAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeeRecords::DueDate).date().not_null())
                    .col(ColumnDef::new(FeeRecords::Status).string().not_null())
                    .col(ColumnDef::new(FeeRecords::Remarks).text().null())
                    .col(
                        ColumnDef::new(FeeRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeRecords::Table, FeeRecords::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeeRecords::Table, FeeRecords::FeeStructureId)
                            .to(FeeStructures::Table, FeeStructures::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fee_records_student")
                    .table(FeeRecords::Table)
                    .col(FeeRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        // 创建缴费流水表
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::FeeRecordId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::PaymentMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::TransactionId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::ReferenceNumber)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(FeePayments::PaymentDate).date().not_null())
                    .col(
                        ColumnDef::new(FeePayments::ReceivedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Remarks).text().null())
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::FeeRecordId)
                            .to(FeeRecords::Table, FeeRecords::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notices::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Notices::Title).string().not_null())
                    .col(ColumnDef::new(Notices::Content).text().not_null())
                    .col(ColumnDef::new(Notices::Priority).string().not_null())
                    .col(ColumnDef::new(Notices::AttachmentToken).string().null())
                    .col(ColumnDef::new(Notices::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Notices::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Notices::PublishDate).big_integer().not_null())
                    .col(ColumnDef::new(Notices::ExpiryDate).big_integer().null())
                    .col(ColumnDef::new(Notices::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notices::Table, Notices::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 通知目标班级关联表
        manager
            .create_table(
                Table::create()
                    .table(NoticeClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NoticeClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NoticeClasses::NoticeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NoticeClasses::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(NoticeClasses::Table, NoticeClasses::NoticeId)
                            .to(Notices::Table, Notices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(NoticeClasses::Table, NoticeClasses::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建行为类别表
        manager
            .create_table(
                Table::create()
                    .table(BehaviorCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BehaviorCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BehaviorCategories::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BehaviorCategories::Name).string().not_null())
                    .col(ColumnDef::new(BehaviorCategories::Kind).string().not_null())
                    .col(
                        ColumnDef::new(BehaviorCategories::Points)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BehaviorCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BehaviorCategories::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建行为记录表
        manager
            .create_table(
                Table::create()
                    .table(BehaviorLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BehaviorLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BehaviorLogs::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BehaviorLogs::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BehaviorLogs::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BehaviorLogs::Title).string().not_null())
                    .col(ColumnDef::new(BehaviorLogs::Description).text().null())
                    .col(ColumnDef::new(BehaviorLogs::DateRecorded).date().not_null())
                    .col(
                        ColumnDef::new(BehaviorLogs::ReportedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BehaviorLogs::ActionTaken).text().null())
                    .col(
                        ColumnDef::new(BehaviorLogs::ParentNotified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BehaviorLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BehaviorLogs::Table, BehaviorLogs::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BehaviorLogs::Table, BehaviorLogs::CategoryId)
                            .to(BehaviorCategories::Table, BehaviorCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_behavior_logs_student")
                    .table(BehaviorLogs::Table)
                    .col(BehaviorLogs::StudentId)
                    .to_owned(),
            )
            .await?;

        // 创建消息表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(ColumnDef::new(Messages::MessageType).string().not_null())
                    .col(ColumnDef::new(Messages::Priority).string().not_null())
                    .col(ColumnDef::new(Messages::SentAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 消息收件人关联表
        manager
            .create_table(
                Table::create()
                    .table(MessageRecipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessageRecipients::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MessageRecipients::MessageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MessageRecipients::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MessageRecipients::Table, MessageRecipients::MessageId)
                            .to(Messages::Table, Messages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_message_recipients_user")
                    .table(MessageRecipients::Table)
                    .col(MessageRecipients::UserId)
                    .to_owned(),
            )
            .await?;

        // 消息已读回执表：重复标记已读幂等
        manager
            .create_table(
                Table::create()
                    .table(MessageReads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MessageReads::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MessageReads::MessageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MessageReads::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MessageReads::ReadAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(MessageReads::Table, MessageReads::MessageId)
                            .to(Messages::Table, Messages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_message_reads")
                    .table(MessageReads::Table)
                    .col(MessageReads::MessageId)
                    .col(MessageReads::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建附件元数据表
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Files::DownloadToken)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Files::FileName).string().not_null())
                    .col(ColumnDef::new(Files::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Files::FileType).string().not_null())
                    .col(ColumnDef::new(Files::UserId).big_integer().null())
                    .col(ColumnDef::new(Files::UploadedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessageReads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MessageRecipients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BehaviorLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BehaviorCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NoticeClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeStructures::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(AssignmentSubmissions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceSummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimetableSlots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Marks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sections {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TeacherProfiles {
    #[sea_orm(iden = "teacher_profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    SchoolId,
    Name,
    ExamType,
    ClassId,
    SectionId,
    SubjectId,
    Date,
    StartTime,
    EndTime,
    MaxMarks,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Marks {
    #[sea_orm(iden = "marks")]
    Table,
    Id,
    StudentId,
    ExamId,
    MarksObtained,
    GradeLetter,
    Remarks,
    GradedBy,
    GradedAt,
}

#[derive(DeriveIden)]
enum TimetableSlots {
    #[sea_orm(iden = "timetable_slots")]
    Table,
    Id,
    SchoolId,
    ClassId,
    SectionId,
    SubjectId,
    TeacherId,
    Weekday,
    WeekdayOrder,
    StartTime,
    EndTime,
    Room,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    SchoolId,
    StudentId,
    ClassId,
    SectionId,
    SubjectId,
    Date,
    Status,
    MarkedBy,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceSummaries {
    #[sea_orm(iden = "attendance_summaries")]
    Table,
    Id,
    StudentId,
    Month,
    TotalDays,
    PresentDays,
    AbsentDays,
    LateDays,
    ExcusedDays,
    AttendancePercentage,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    SchoolId,
    Title,
    Description,
    ClassId,
    SectionId,
    SubjectId,
    TeacherId,
    AssignedDate,
    DueDate,
    MaxMarks,
    Status,
    Instructions,
    AttachmentToken,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    #[sea_orm(iden = "assignment_submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    SubmissionText,
    AttachmentToken,
    SubmittedAt,
    Status,
    MarksObtained,
    TeacherFeedback,
    GradedBy,
    GradedAt,
}

#[derive(DeriveIden)]
enum FeeStructures {
    #[sea_orm(iden = "fee_structures")]
    Table,
    Id,
    SchoolId,
    ClassId,
    FeeType,
    Amount,
    AcademicYear,
    LateFeePercentage,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FeeRecords {
    #[sea_orm(iden = "fee_records")]
    Table,
    Id,
    SchoolId,
    StudentId,
    FeeStructureId,
    Amount,
    LateFee,
    PaidAmount,
    DueDate,
    Status,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeePayments {
    #[sea_orm(iden = "fee_payments")]
    Table,
    Id,
    FeeRecordId,
    Amount,
    PaymentMethod,
    TransactionId,
    ReferenceNumber,
    PaymentDate,
    ReceivedBy,
    Remarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notices {
    #[sea_orm(iden = "notices")]
    Table,
    Id,
    SchoolId,
    Title,
    Content,
    Priority,
    AttachmentToken,
    CreatedBy,
    IsActive,
    PublishDate,
    ExpiryDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NoticeClasses {
    #[sea_orm(iden = "notice_classes")]
    Table,
    Id,
    NoticeId,
    ClassId,
}

#[derive(DeriveIden)]
enum BehaviorCategories {
    #[sea_orm(iden = "behavior_categories")]
    Table,
    Id,
    SchoolId,
    Name,
    Kind,
    Points,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BehaviorLogs {
    #[sea_orm(iden = "behavior_logs")]
    Table,
    Id,
    SchoolId,
    StudentId,
    CategoryId,
    Title,
    Description,
    DateRecorded,
    ReportedBy,
    ActionTaken,
    ParentNotified,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    SchoolId,
    SenderId,
    Subject,
    Content,
    MessageType,
    Priority,
    SentAt,
}

#[derive(DeriveIden)]
enum MessageRecipients {
    #[sea_orm(iden = "message_recipients")]
    Table,
    Id,
    MessageId,
    UserId,
}

#[derive(DeriveIden)]
enum MessageReads {
    #[sea_orm(iden = "message_reads")]
    Table,
    Id,
    MessageId,
    UserId,
    ReadAt,
}

#[derive(DeriveIden)]
enum Files {
    #[sea_orm(iden = "files")]
    Table,
    Id,
    DownloadToken,
    FileName,
    FileSize,
    FileType,
    UserId,
    UploadedAt,
}
