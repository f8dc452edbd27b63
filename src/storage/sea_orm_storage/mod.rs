//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendance;
mod behavior;
mod exams;
mod fees;
mod files;
mod marks;
mod messages;
mod notices;
mod org;
mod profiles;
mod scope;
mod submissions;
mod timetables;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolLmsError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolLmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolLmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolLmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolLmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolLmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    academic::{
        entities::{Exam, Mark, TimetableSlot},
        requests::{
            CreateExamRequest, CreateTimetableSlotRequest, ExamListQuery, MarkListQuery,
            TimetableListQuery, UpdateExamRequest, UpsertMarkRequest,
        },
        responses::{
            ExamListResponse, MarkListResponse, StudentPerformanceResponse, TimetableListResponse,
        },
    },
    assignments::{
        entities::{Assignment, AssignmentSubmission},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, CreateSubmissionRequest,
            GradeSubmissionRequest, SubmissionListQuery, UpdateAssignmentRequest,
        },
        responses::{
            AssignmentListResponse, AssignmentStatsResponse, StudentProgressResponse,
            SubmissionListResponse,
        },
    },
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceListQuery, BulkMarkAttendanceRequest, SummaryListQuery},
        responses::{
            AttendanceListResponse, AttendanceStatisticsResponse, BulkMarkResponse,
            ClassReportResponse, SummaryListResponse,
        },
    },
    behavior::{
        entities::{BehaviorCategory, BehaviorLog},
        requests::{
            BehaviorLogListQuery, CreateBehaviorCategoryRequest, CreateBehaviorLogRequest,
        },
        responses::{BehaviorLogListResponse, BehaviorPointsResponse},
    },
    fees::{
        entities::{FeePayment, FeeRecord, FeeStructure},
        requests::{
            CreateFeeRecordRequest, CreateFeeStructureRequest, FeeRecordListQuery,
            FeeStructureListQuery, MakePaymentRequest,
        },
        responses::{
            FeeRecordListResponse, FeeStructureListResponse, FeeSummaryResponse, PaymentResponse,
        },
    },
    files::entities::File,
    messages::{
        entities::{Message, MessageRead},
        requests::{MessageListQuery, SendMessageRequest},
        responses::MessageListResponse,
    },
    notices::{
        entities::Notice,
        requests::{CreateNoticeRequest, NoticeListQuery, UpdateNoticeRequest},
        responses::NoticeListResponse,
    },
    org::{
        entities::{
            Class, ParentProfile, PrincipalProfile, School, Section, StudentProfile, Subject,
            TeacherProfile,
        },
        requests::{
            CreateClassRequest, CreateParentProfileRequest, CreatePrincipalProfileRequest,
            CreateSchoolRequest, CreateSectionRequest, CreateStudentProfileRequest,
            CreateSubjectRequest, CreateTeacherProfileRequest, OrgListQuery, UpdateSchoolRequest,
            UpdateSectionRequest, UpdateStudentProfileRequest, UpdateTeacherProfileRequest,
        },
        responses::{
            ClassListResponse, ParentProfileListResponse, SchoolListResponse, SectionListResponse,
            StudentProfileListResponse, SubjectListResponse, TeacherProfileListResponse,
        },
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::policy::{ChildLink, Scope};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 组织结构模块
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(req).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn list_schools(&self, query: OrgListQuery) -> Result<SchoolListResponse> {
        self.list_schools_impl(query).await
    }

    async fn update_school(&self, id: i64, update: UpdateSchoolRequest) -> Result<Option<School>> {
        self.update_school_impl(id, update).await
    }

    async fn create_class(&self, req: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(req).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self, query: OrgListQuery) -> Result<ClassListResponse> {
        self.list_classes_impl(query).await
    }

    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section> {
        self.create_section_impl(req).await
    }

    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>> {
        self.get_section_by_id_impl(id).await
    }

    async fn list_sections(&self, query: OrgListQuery) -> Result<SectionListResponse> {
        self.list_sections_impl(query).await
    }

    async fn update_section(
        &self,
        id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        self.update_section_impl(id, update).await
    }

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, query: OrgListQuery) -> Result<SubjectListResponse> {
        self.list_subjects_impl(query).await
    }

    // 档案模块
    async fn create_teacher_profile(
        &self,
        req: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile> {
        self.create_teacher_profile_impl(req).await
    }

    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_id_impl(id).await
    }

    async fn get_teacher_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_user_id_impl(user_id).await
    }

    async fn list_teacher_profiles(
        &self,
        query: OrgListQuery,
    ) -> Result<TeacherProfileListResponse> {
        self.list_teacher_profiles_impl(query).await
    }

    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>> {
        self.update_teacher_profile_impl(id, update).await
    }

    async fn create_student_profile(
        &self,
        req: CreateStudentProfileRequest,
    ) -> Result<StudentProfile> {
        self.create_student_profile_impl(req).await
    }

    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_id_impl(id).await
    }

    async fn get_student_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_user_id_impl(user_id).await
    }

    async fn list_student_profiles(
        &self,
        query: OrgListQuery,
    ) -> Result<StudentProfileListResponse> {
        self.list_student_profiles_impl(query).await
    }

    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>> {
        self.update_student_profile_impl(id, update).await
    }

    async fn list_students_by_section(&self, section_id: i64) -> Result<Vec<StudentProfile>> {
        self.list_students_by_section_impl(section_id).await
    }

    async fn create_parent_profile(
        &self,
        req: CreateParentProfileRequest,
    ) -> Result<ParentProfile> {
        self.create_parent_profile_impl(req).await
    }

    async fn get_parent_profile_by_user_id(&self, user_id: i64) -> Result<Option<ParentProfile>> {
        self.get_parent_profile_by_user_id_impl(user_id).await
    }

    async fn list_parent_profiles(&self, query: OrgListQuery)
        -> Result<ParentProfileListResponse> {
        self.list_parent_profiles_impl(query).await
    }

    async fn list_parent_children_links(&self, parent_id: i64) -> Result<Vec<ChildLink>> {
        self.list_parent_children_links_impl(parent_id).await
    }

    async fn create_principal_profile(
        &self,
        req: CreatePrincipalProfileRequest,
    ) -> Result<PrincipalProfile> {
        self.create_principal_profile_impl(req).await
    }

    async fn get_principal_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<PrincipalProfile>> {
        self.get_principal_profile_by_user_id_impl(user_id).await
    }

    // 学业模块
    async fn create_exam(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateExamRequest,
    ) -> Result<Exam> {
        self.create_exam_impl(school_id, created_by, req).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self, scope: &Scope, query: ExamListQuery) -> Result<ExamListResponse> {
        self.list_exams_impl(scope, query).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn upsert_mark(
        &self,
        graded_by: i64,
        grade_letter: String,
        req: UpsertMarkRequest,
    ) -> Result<Mark> {
        self.upsert_mark_impl(graded_by, grade_letter, req).await
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
        self.get_mark_by_id_impl(id).await
    }

    async fn list_marks(&self, scope: &Scope, query: MarkListQuery) -> Result<MarkListResponse> {
        self.list_marks_impl(scope, query).await
    }

    async fn get_student_performance(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentPerformanceResponse> {
        self.get_student_performance_impl(student).await
    }

    async fn create_timetable_slot(
        &self,
        school_id: i64,
        req: CreateTimetableSlotRequest,
    ) -> Result<TimetableSlot> {
        self.create_timetable_slot_impl(school_id, req).await
    }

    async fn get_timetable_slot_by_id(&self, id: i64) -> Result<Option<TimetableSlot>> {
        self.get_timetable_slot_by_id_impl(id).await
    }

    async fn list_timetable_slots(
        &self,
        scope: &Scope,
        query: TimetableListQuery,
    ) -> Result<TimetableListResponse> {
        self.list_timetable_slots_impl(scope, query).await
    }

    async fn delete_timetable_slot(&self, id: i64) -> Result<bool> {
        self.delete_timetable_slot_impl(id).await
    }

    // 考勤模块
    async fn bulk_mark_attendance(
        &self,
        school_id: i64,
        marked_by: i64,
        req: BulkMarkAttendanceRequest,
    ) -> Result<BulkMarkResponse> {
        self.bulk_mark_attendance_impl(school_id, marked_by, req)
            .await
    }

    async fn get_attendance_record_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_record_by_id_impl(id).await
    }

    async fn list_attendance_records(
        &self,
        scope: &Scope,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_records_impl(scope, query).await
    }

    async fn attendance_statistics(
        &self,
        scope: &Scope,
        class_id: Option<i64>,
        student_id: Option<i64>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceStatisticsResponse> {
        self.attendance_statistics_impl(scope, class_id, student_id, date_from, date_to)
            .await
    }

    async fn class_attendance_report(
        &self,
        section_id: i64,
        date: NaiveDate,
        subject_id: Option<i64>,
    ) -> Result<ClassReportResponse> {
        self.class_attendance_report_impl(section_id, date, subject_id)
            .await
    }

    async fn list_attendance_summaries(
        &self,
        scope: &Scope,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse> {
        self.list_attendance_summaries_impl(scope, query).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        school_id: i64,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(school_id, teacher_id, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(
        &self,
        scope: &Scope,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_impl(scope, query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn upsert_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<AssignmentSubmission> {
        self.upsert_submission_impl(student_id, req).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions(
        &self,
        scope: &Scope,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_impl(scope, query).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        graded_by: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<AssignmentSubmission>> {
        self.grade_submission_impl(id, graded_by, req).await
    }

    async fn assignment_statistics(
        &self,
        assignment_id: i64,
    ) -> Result<AssignmentStatsResponse> {
        self.assignment_statistics_impl(assignment_id).await
    }

    async fn student_assignment_progress(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentProgressResponse> {
        self.student_assignment_progress_impl(student).await
    }

    // 费用模块
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure> {
        self.create_fee_structure_impl(req).await
    }

    async fn list_fee_structures(
        &self,
        query: FeeStructureListQuery,
    ) -> Result<FeeStructureListResponse> {
        self.list_fee_structures_impl(query).await
    }

    async fn create_fee_record(
        &self,
        school_id: i64,
        req: CreateFeeRecordRequest,
    ) -> Result<FeeRecord> {
        self.create_fee_record_impl(school_id, req).await
    }

    async fn get_fee_record_by_id(&self, id: i64) -> Result<Option<FeeRecord>> {
        self.get_fee_record_by_id_impl(id).await
    }

    async fn list_fee_records(
        &self,
        scope: &Scope,
        query: FeeRecordListQuery,
    ) -> Result<FeeRecordListResponse> {
        self.list_fee_records_impl(scope, query).await
    }

    async fn list_payments_for_record(&self, record_id: i64) -> Result<Vec<FeePayment>> {
        self.list_payments_for_record_impl(record_id).await
    }

    async fn apply_fee_payment(
        &self,
        record_id: i64,
        received_by: i64,
        req: MakePaymentRequest,
    ) -> Result<PaymentResponse> {
        self.apply_fee_payment_impl(record_id, received_by, req)
            .await
    }

    async fn fee_summary(&self, scope: &Scope) -> Result<FeeSummaryResponse> {
        self.fee_summary_impl(scope).await
    }

    // 通知模块
    async fn create_notice(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateNoticeRequest,
    ) -> Result<Notice> {
        self.create_notice_impl(school_id, created_by, req).await
    }

    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>> {
        self.get_notice_by_id_impl(id).await
    }

    async fn list_notices(
        &self,
        scope: &Scope,
        query: NoticeListQuery,
    ) -> Result<NoticeListResponse> {
        self.list_notices_impl(scope, query).await
    }

    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>> {
        self.update_notice_impl(id, update).await
    }

    async fn delete_notice(&self, id: i64) -> Result<bool> {
        self.delete_notice_impl(id).await
    }

    // 行为模块
    async fn create_behavior_category(
        &self,
        req: CreateBehaviorCategoryRequest,
    ) -> Result<BehaviorCategory> {
        self.create_behavior_category_impl(req).await
    }

    async fn get_behavior_category_by_id(&self, id: i64) -> Result<Option<BehaviorCategory>> {
        self.get_behavior_category_by_id_impl(id).await
    }

    async fn list_behavior_categories(
        &self,
        school_id: Option<i64>,
    ) -> Result<Vec<BehaviorCategory>> {
        self.list_behavior_categories_impl(school_id).await
    }

    async fn create_behavior_log(
        &self,
        school_id: i64,
        reported_by: i64,
        req: CreateBehaviorLogRequest,
    ) -> Result<BehaviorLog> {
        self.create_behavior_log_impl(school_id, reported_by, req)
            .await
    }

    async fn get_behavior_log_by_id(&self, id: i64) -> Result<Option<BehaviorLog>> {
        self.get_behavior_log_by_id_impl(id).await
    }

    async fn list_behavior_logs(
        &self,
        scope: &Scope,
        query: BehaviorLogListQuery,
    ) -> Result<BehaviorLogListResponse> {
        self.list_behavior_logs_impl(scope, query).await
    }

    async fn student_behavior_points(&self, student_id: i64) -> Result<BehaviorPointsResponse> {
        self.student_behavior_points_impl(student_id).await
    }

    // 消息模块
    async fn send_message(
        &self,
        school_id: i64,
        sender_id: i64,
        req: SendMessageRequest,
    ) -> Result<Message> {
        self.send_message_impl(school_id, sender_id, req).await
    }

    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        self.get_message_by_id_impl(id).await
    }

    async fn list_messages(
        &self,
        user_id: i64,
        query: MessageListQuery,
    ) -> Result<MessageListResponse> {
        self.list_messages_impl(user_id, query).await
    }

    async fn mark_message_read(&self, message_id: i64, user_id: i64) -> Result<MessageRead> {
        self.mark_message_read_impl(message_id, user_id).await
    }

    // 文件模块
    async fn upload_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(download_token, file_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }
}
