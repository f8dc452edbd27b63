use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 组织结构管理方法
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>>;
    async fn list_schools(&self, query: OrgListQuery) -> Result<SchoolListResponse>;
    async fn update_school(&self, id: i64, update: UpdateSchoolRequest) -> Result<Option<School>>;

    async fn create_class(&self, req: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self, query: OrgListQuery) -> Result<ClassListResponse>;

    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section>;
    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>>;
    async fn list_sections(&self, query: OrgListQuery) -> Result<SectionListResponse>;
    async fn update_section(
        &self,
        id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>>;

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, query: OrgListQuery) -> Result<SubjectListResponse>;

    /// 档案管理方法
    async fn create_teacher_profile(
        &self,
        req: CreateTeacherProfileRequest,
    ) -> Result<TeacherProfile>;
    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>>;
    async fn get_teacher_profile_by_user_id(&self, user_id: i64)
        -> Result<Option<TeacherProfile>>;
    async fn list_teacher_profiles(&self, query: OrgListQuery)
        -> Result<TeacherProfileListResponse>;
    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateTeacherProfileRequest,
    ) -> Result<Option<TeacherProfile>>;

    async fn create_student_profile(
        &self,
        req: CreateStudentProfileRequest,
    ) -> Result<StudentProfile>;
    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>>;
    async fn get_student_profile_by_user_id(&self, user_id: i64)
        -> Result<Option<StudentProfile>>;
    async fn list_student_profiles(&self, query: OrgListQuery)
        -> Result<StudentProfileListResponse>;
    async fn update_student_profile(
        &self,
        id: i64,
        update: UpdateStudentProfileRequest,
    ) -> Result<Option<StudentProfile>>;
    // 列出分班内全部学生（班级报表用，不分页）
    async fn list_students_by_section(&self, section_id: i64) -> Result<Vec<StudentProfile>>;

    async fn create_parent_profile(&self, req: CreateParentProfileRequest)
        -> Result<ParentProfile>;
    async fn get_parent_profile_by_user_id(&self, user_id: i64) -> Result<Option<ParentProfile>>;
    async fn list_parent_profiles(&self, query: OrgListQuery) -> Result<ParentProfileListResponse>;
    // 家长子女链接（含班级/分班与主监护标记），策略解析用
    async fn list_parent_children_links(&self, parent_id: i64) -> Result<Vec<ChildLink>>;

    async fn create_principal_profile(
        &self,
        req: CreatePrincipalProfileRequest,
    ) -> Result<PrincipalProfile>;
    async fn get_principal_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<PrincipalProfile>>;

    /// 学业模块方法
    async fn create_exam(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateExamRequest,
    ) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, scope: &Scope, query: ExamListQuery) -> Result<ExamListResponse>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    // 录入成绩：同一 (student, exam) 已存在则原地更新
    async fn upsert_mark(
        &self,
        graded_by: i64,
        grade_letter: String,
        req: UpsertMarkRequest,
    ) -> Result<Mark>;
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>>;
    async fn list_marks(&self, scope: &Scope, query: MarkListQuery) -> Result<MarkListResponse>;
    // 学生成绩汇总（按科目分组）
    async fn get_student_performance(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentPerformanceResponse>;

    // 创建课程表条目：同一 (班级, 分班, 周几, 开始时间) 冲突时报 Conflict
    async fn create_timetable_slot(
        &self,
        school_id: i64,
        req: CreateTimetableSlotRequest,
    ) -> Result<TimetableSlot>;
    async fn get_timetable_slot_by_id(&self, id: i64) -> Result<Option<TimetableSlot>>;
    async fn list_timetable_slots(
        &self,
        scope: &Scope,
        query: TimetableListQuery,
    ) -> Result<TimetableListResponse>;
    async fn delete_timetable_slot(&self, id: i64) -> Result<bool>;

    /// 考勤模块方法
    // 批量点名：整批一个事务，逐条 upsert，随后同步重算受影响的月度汇总
    async fn bulk_mark_attendance(
        &self,
        school_id: i64,
        marked_by: i64,
        req: BulkMarkAttendanceRequest,
    ) -> Result<BulkMarkResponse>;
    async fn get_attendance_record_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance_records(
        &self,
        scope: &Scope,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn attendance_statistics(
        &self,
        scope: &Scope,
        class_id: Option<i64>,
        student_id: Option<i64>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<AttendanceStatisticsResponse>;
    // 班级考勤报表：未点名学生以 not_marked 占位
    async fn class_attendance_report(
        &self,
        section_id: i64,
        date: NaiveDate,
        subject_id: Option<i64>,
    ) -> Result<ClassReportResponse>;
    async fn list_attendance_summaries(
        &self,
        scope: &Scope,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse>;

    /// 作业模块方法
    async fn create_assignment(
        &self,
        school_id: i64,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(
        &self,
        scope: &Scope,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    // 学生提交作业：同一 (assignment, student) 已存在则原地更新
    async fn upsert_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<AssignmentSubmission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>>;
    async fn list_submissions(
        &self,
        scope: &Scope,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    async fn grade_submission(
        &self,
        id: i64,
        graded_by: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<AssignmentSubmission>>;
    async fn assignment_statistics(&self, assignment_id: i64)
        -> Result<AssignmentStatsResponse>;
    // 学生作业进度：未提交的作业以 submitted=false 占位
    async fn student_assignment_progress(
        &self,
        student: &StudentProfile,
    ) -> Result<StudentProgressResponse>;

    /// 费用模块方法
    async fn create_fee_structure(&self, req: CreateFeeStructureRequest) -> Result<FeeStructure>;
    async fn list_fee_structures(
        &self,
        query: FeeStructureListQuery,
    ) -> Result<FeeStructureListResponse>;
    async fn create_fee_record(
        &self,
        school_id: i64,
        req: CreateFeeRecordRequest,
    ) -> Result<FeeRecord>;
    async fn get_fee_record_by_id(&self, id: i64) -> Result<Option<FeeRecord>>;
    async fn list_fee_records(
        &self,
        scope: &Scope,
        query: FeeRecordListQuery,
    ) -> Result<FeeRecordListResponse>;
    // 缴费记录的流水列表
    async fn list_payments_for_record(&self, record_id: i64) -> Result<Vec<FeePayment>>;
    // 缴费：校验不超过未结余额，累加已缴并推导状态，单事务提交
    async fn apply_fee_payment(
        &self,
        record_id: i64,
        received_by: i64,
        req: MakePaymentRequest,
    ) -> Result<PaymentResponse>;
    async fn fee_summary(&self, scope: &Scope) -> Result<FeeSummaryResponse>;

    /// 通知模块方法
    async fn create_notice(
        &self,
        school_id: i64,
        created_by: i64,
        req: CreateNoticeRequest,
    ) -> Result<Notice>;
    async fn get_notice_by_id(&self, id: i64) -> Result<Option<Notice>>;
    async fn list_notices(
        &self,
        scope: &Scope,
        query: NoticeListQuery,
    ) -> Result<NoticeListResponse>;
    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>>;
    async fn delete_notice(&self, id: i64) -> Result<bool>;

    /// 行为模块方法
    async fn create_behavior_category(
        &self,
        req: CreateBehaviorCategoryRequest,
    ) -> Result<BehaviorCategory>;
    async fn get_behavior_category_by_id(&self, id: i64) -> Result<Option<BehaviorCategory>>;
    async fn list_behavior_categories(&self, school_id: Option<i64>)
        -> Result<Vec<BehaviorCategory>>;
    async fn create_behavior_log(
        &self,
        school_id: i64,
        reported_by: i64,
        req: CreateBehaviorLogRequest,
    ) -> Result<BehaviorLog>;
    async fn get_behavior_log_by_id(&self, id: i64) -> Result<Option<BehaviorLog>>;
    async fn list_behavior_logs(
        &self,
        scope: &Scope,
        query: BehaviorLogListQuery,
    ) -> Result<BehaviorLogListResponse>;
    // 学生行为分汇总：各记录所属类别分值之和
    async fn student_behavior_points(&self, student_id: i64) -> Result<BehaviorPointsResponse>;

    /// 消息模块方法
    async fn send_message(
        &self,
        school_id: i64,
        sender_id: i64,
        req: SendMessageRequest,
    ) -> Result<Message>;
    async fn get_message_by_id(&self, id: i64) -> Result<Option<Message>>;
    async fn list_messages(
        &self,
        user_id: i64,
        query: MessageListQuery,
    ) -> Result<MessageListResponse>;
    // 标记已读：幂等，(message, user) 已存在时返回原回执
    async fn mark_message_read(&self, message_id: i64, user_id: i64) -> Result<MessageRead>;

    /// 文件模块方法
    async fn upload_file(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
