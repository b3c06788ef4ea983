use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    AccessScope, PaginatedResponse, PaginationQuery,
    analytics::{
        facts::{AttendanceFact, FactFilter, GradeFact, HomeworkFact},
        requests::DateRange,
    },
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceEntry, AttendanceListQuery, UpdateAttendanceRequest},
        responses::{AttendanceSummary, AttendanceView},
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::{ClassListItem, ClassStats},
    },
    complaints::{
        requests::{ComplaintListQuery, NewComplaint, UpdateComplaintRequest},
        responses::ComplaintView,
    },
    grades::{
        requests::{GradeListQuery, NewGrade},
        responses::GradeView,
    },
    homework::{
        entities::{HomeworkSubmission, SubmissionStatus},
        requests::{HomeworkListQuery, NewHomework, UpdateHomeworkRequest},
        responses::HomeworkView,
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NewNotification, NotificationListQuery},
    },
    qa::{
        entities::QaStatus,
        requests::{NewQaMessage, QaListQuery},
        responses::QaView,
    },
    schools::{
        entities::School,
        requests::{NewSchool, UpdateSchoolRequest},
        responses::SchoolStats,
    },
    students::{
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListItem,
    },
    subjects::{
        entities::{Subject, SubjectBrief},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
    teachers::{
        requests::{NewTeacher, TeacherListQuery, UpdateTeacherRequest},
        responses::{TeacherListItem, TeacherStats},
    },
    timetable::{
        entities::TimetableEntry,
        requests::{TimetableListQuery, TimetableSlot},
        responses::{TimetableEntryView, TimetableStats},
    },
    users::{
        entities::User,
        requests::{NewUser, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学校管理方法
    // 注册学校并创建管理员（同一事务）
    async fn register_school(&self, school: NewSchool, admin: NewUser) -> Result<(School, User)>;
    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>>;
    async fn get_school_by_email(&self, email: &str) -> Result<Option<School>>;
    async fn update_school(&self, id: i64, update: UpdateSchoolRequest) -> Result<Option<School>>;
    // 学生、教师、班级、家长、科目数量
    async fn get_school_stats(&self, school_id: i64) -> Result<SchoolStats>;

    /// 用户管理方法
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 限定学校内查找用户
    async fn get_school_user(&self, school_id: i64, id: i64) -> Result<Option<User>>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_user_password(&self, id: i64, password_hash: String) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 软删除用户
    async fn deactivate_user(&self, id: i64) -> Result<bool>;
    // 是否为本校有效的班主任或任课教师
    async fn is_active_teacher_user(&self, school_id: i64, user_id: i64) -> Result<bool>;

    /// 班级管理方法
    async fn create_class(&self, school_id: i64, class: CreateClassRequest) -> Result<Class>;
    async fn get_class(&self, school_id: i64, id: i64) -> Result<Option<Class>>;
    // 范围内的班级（附带班主任与人数）
    async fn get_class_item(&self, scope: AccessScope, id: i64) -> Result<Option<ClassListItem>>;
    async fn list_classes(
        &self,
        scope: AccessScope,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<ClassListItem>>;
    // 范围内全部有效班级
    async fn class_items(&self, scope: AccessScope) -> Result<Vec<ClassListItem>>;
    // 同校同学年同名同班是否已存在
    async fn class_exists(
        &self,
        school_id: i64,
        name: &str,
        section: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>>;
    async fn count_class_students(&self, class_id: i64) -> Result<i64>;
    async fn deactivate_class(&self, id: i64) -> Result<bool>;
    async fn get_class_stats(&self, school_id: i64) -> Result<ClassStats>;

    /// 学生管理方法
    async fn create_student(&self, student: NewStudent) -> Result<StudentListItem>;
    // 批量创建，任意一条失败则全部回滚
    async fn create_students_bulk(&self, students: Vec<NewStudent>)
    -> Result<Vec<StudentListItem>>;
    async fn get_student(&self, scope: AccessScope, id: i64) -> Result<Option<StudentListItem>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<StudentListItem>>;
    async fn list_students(
        &self,
        scope: AccessScope,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<StudentListItem>>;
    // 范围内全部有效学生
    async fn scoped_students(&self, scope: AccessScope) -> Result<Vec<StudentListItem>>;
    async fn students_of_class(&self, class_id: i64) -> Result<Vec<StudentListItem>>;
    async fn recent_students(&self, school_id: i64, limit: u64) -> Result<Vec<StudentListItem>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentListItem>>;
    // 软删除学生及其账号（同一事务）
    async fn deactivate_student(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<TeacherListItem>;
    async fn get_teacher(&self, school_id: i64, id: i64) -> Result<Option<TeacherListItem>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<TeacherListItem>>;
    async fn list_teachers(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<TeacherListItem>>;
    async fn active_teachers(&self, school_id: i64) -> Result<Vec<TeacherListItem>>;
    async fn recent_teachers(&self, school_id: i64, limit: u64) -> Result<Vec<TeacherListItem>>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherListItem>>;
    async fn deactivate_teacher(&self, id: i64) -> Result<bool>;
    async fn get_teacher_stats(&self, school_id: i64) -> Result<TeacherStats>;

    /// 科目管理方法
    async fn create_subject(&self, school_id: i64, subject: CreateSubjectRequest)
    -> Result<Subject>;
    async fn get_subject(&self, school_id: i64, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, school_id: i64, query: SubjectListQuery) -> Result<Vec<Subject>>;
    async fn subject_code_exists(
        &self,
        school_id: i64,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn deactivate_subject(&self, id: i64) -> Result<bool>;
    // 教师在有效课表中任教的科目
    async fn subjects_taught_by(&self, school_id: i64, teacher_id: i64)
    -> Result<Vec<SubjectBrief>>;

    /// 课表管理方法
    async fn list_timetable(
        &self,
        scope: AccessScope,
        query: TimetableListQuery,
    ) -> Result<Vec<TimetableEntryView>>;
    async fn get_timetable_entry(&self, school_id: i64, id: i64)
    -> Result<Option<TimetableEntry>>;
    // 在可串行化事务中检查时段冲突后写入
    async fn create_timetable_entry(
        &self,
        school_id: i64,
        slot: TimetableSlot,
    ) -> Result<TimetableEntryView>;
    async fn update_timetable_entry(
        &self,
        school_id: i64,
        id: i64,
        slot: TimetableSlot,
        check_teacher: bool,
    ) -> Result<TimetableEntryView>;
    async fn deactivate_timetable_entry(&self, id: i64) -> Result<bool>;
    async fn get_timetable_stats(&self, school_id: i64, academic_year: &str)
    -> Result<TimetableStats>;

    /// 出勤管理方法
    // 同一事务内检查并写入整班出勤，返回写入条数
    async fn mark_attendance(
        &self,
        class_id: i64,
        date: NaiveDate,
        marked_by: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<i64>;
    async fn get_attendance(&self, scope: AccessScope, id: i64)
    -> Result<Option<AttendanceRecord>>;
    async fn list_class_attendance(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceView>>;
    // 分页记录与区间内的汇总
    async fn list_student_attendance(
        &self,
        student_id: i64,
        query: AttendanceListQuery,
    ) -> Result<(PaginatedResponse<AttendanceView>, AttendanceSummary)>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    async fn attendance_facts(
        &self,
        scope: AccessScope,
        filter: FactFilter,
    ) -> Result<Vec<AttendanceFact>>;
    // 分析页的记录列表（日期倒序）
    async fn attendance_page(
        &self,
        scope: AccessScope,
        filter: FactFilter,
        pagination: PaginationQuery,
    ) -> Result<PaginatedResponse<AttendanceView>>;
    async fn recent_attendance(&self, scope: AccessScope, limit: u64)
    -> Result<Vec<AttendanceView>>;

    /// 作业管理方法
    async fn create_homework(&self, homework: NewHomework) -> Result<HomeworkView>;
    async fn get_homework(&self, school_id: i64, id: i64) -> Result<Option<HomeworkView>>;
    async fn list_homework(
        &self,
        scope: AccessScope,
        query: HomeworkListQuery,
    ) -> Result<PaginatedResponse<HomeworkView>>;
    async fn update_homework(
        &self,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<HomeworkView>>;
    // 删除作业及其提交
    async fn delete_homework(&self, id: i64) -> Result<bool>;
    // 范围内作业及提交情况，可按班级、教师、创建时间过滤
    async fn homework_facts(
        &self,
        scope: AccessScope,
        class_id: Option<i64>,
        teacher_id: Option<i64>,
        created_in: Option<DateRange>,
    ) -> Result<Vec<HomeworkFact>>;
    // 已发布且未到期的作业
    async fn pending_homework(
        &self,
        scope: AccessScope,
        teacher_id: Option<i64>,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<HomeworkView>>;
    async fn create_submission(
        &self,
        homework_id: i64,
        student_id: i64,
        content: Option<String>,
        status: SubmissionStatus,
    ) -> Result<HomeworkSubmission>;
    async fn submissions_of_student(&self, student_id: i64) -> Result<Vec<HomeworkSubmission>>;

    /// 成绩管理方法
    async fn create_grade(&self, grade: NewGrade) -> Result<GradeView>;
    async fn list_grades(
        &self,
        scope: AccessScope,
        query: GradeListQuery,
        range: Option<DateRange>,
    ) -> Result<PaginatedResponse<GradeView>>;
    async fn grade_facts(&self, scope: AccessScope, filter: FactFilter) -> Result<Vec<GradeFact>>;

    /// 通知管理方法
    // 解析接收者 ID
    async fn resolve_recipients(
        &self,
        school_id: i64,
        request: &CreateNotificationRequest,
    ) -> Result<Vec<i64>>;
    async fn create_notifications(&self, notifications: Vec<NewNotification>) -> Result<i64>;
    async fn list_notifications(
        &self,
        school_id: i64,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>>;
    async fn get_notification(&self, school_id: i64, id: i64) -> Result<Option<Notification>>;
    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;
    async fn notifications_since(
        &self,
        school_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Notification>>;
    // 面向全校或指定班级的公告
    async fn announcements(
        &self,
        school_id: i64,
        class_ids: Vec<i64>,
        limit: u64,
    ) -> Result<Vec<Notification>>;

    /// 家校问答方法
    async fn create_qa(&self, message: NewQaMessage) -> Result<QaView>;
    async fn get_qa(&self, scope: AccessScope, id: i64) -> Result<Option<QaView>>;
    async fn list_qa(
        &self,
        scope: AccessScope,
        query: QaListQuery,
    ) -> Result<PaginatedResponse<QaView>>;
    async fn reply_qa(&self, id: i64, reply: String) -> Result<Option<QaView>>;
    async fn update_qa_status(&self, id: i64, status: QaStatus) -> Result<Option<QaView>>;
    async fn delete_qa(&self, id: i64) -> Result<bool>;

    /// 投诉管理方法
    async fn create_complaint(&self, complaint: NewComplaint) -> Result<ComplaintView>;
    async fn get_complaint(&self, scope: AccessScope, id: i64) -> Result<Option<ComplaintView>>;
    async fn list_complaints(
        &self,
        scope: AccessScope,
        query: ComplaintListQuery,
    ) -> Result<PaginatedResponse<ComplaintView>>;
    async fn update_complaint(
        &self,
        id: i64,
        update: UpdateComplaintRequest,
    ) -> Result<Option<ComplaintView>>;
    async fn resolve_complaint(
        &self,
        id: i64,
        resolver_id: i64,
        resolution: String,
    ) -> Result<Option<ComplaintView>>;
    async fn delete_complaint(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
