//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 需要按角色过滤的查询统一通过 `scope` 模块生成条件。

mod attendance;
mod classes;
mod complaints;
mod grades;
mod homeworks;
mod lookups;
mod notifications;
mod qa;
mod schools;
mod scope;
mod students;
mod subjects;
mod teachers;
mod timetables;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::{PaginationInfo, PaginationQuery};
use crate::utils::sql::contains_pattern;
use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, Select, SqlErr,
};
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

        Self::from_connection(db).await
    }

    /// 在已有连接上运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!(
            "SeaORM storage initialized, backend: {:?}",
            db.get_database_backend()
        );

        Ok(Self { db })
    }

    /// 单连接的内存 SQLite，用于本地调试和测试
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 当前 unix 秒
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 带上下文的数据库错误转换，唯一约束与外键错误保留原有分类
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> SchoolError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_))
        | Some(SqlErr::ForeignKeyConstraintViolation(_)) => SchoolError::from(e),
        _ => SchoolError::database_operation(format!("{context}: {e}")),
    }
}

/// `%keyword%` 模糊匹配
pub(crate) fn like_keyword(keyword: &str) -> LikeExpr {
    LikeExpr::new(contains_pattern(keyword)).escape('\\')
}

/// 非空白的搜索关键字
pub(crate) fn search_keyword(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

/// 分页查询
pub(crate) async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    pagination: &PaginationQuery,
    context: &'static str,
) -> Result<(Vec<E::Model>, PaginationInfo)>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let (page, limit) = pagination.normalized();
    let paginator = select.paginate(db, limit);
    let total = paginator.num_items().await.map_err(db_error(context))?;
    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(db_error(context))?;

    Ok((items, PaginationInfo::new(page, limit, total)))
}

// Storage trait 实现
use crate::models::{
    AccessScope, PaginatedResponse,
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学校模块
    async fn register_school(&self, school: NewSchool, admin: NewUser) -> Result<(School, User)> {
        self.register_school_impl(school, admin).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn get_school_by_email(&self, email: &str) -> Result<Option<School>> {
        self.get_school_by_email_impl(email).await
    }

    async fn update_school(&self, id: i64, update: UpdateSchoolRequest) -> Result<Option<School>> {
        self.update_school_impl(id, update).await
    }

    async fn get_school_stats(&self, school_id: i64) -> Result<SchoolStats> {
        self.get_school_stats_impl(school_id).await
    }

    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_school_user(&self, school_id: i64, id: i64) -> Result<Option<User>> {
        self.get_school_user_impl(school_id, id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_user_password(&self, id: i64, password_hash: String) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn deactivate_user(&self, id: i64) -> Result<bool> {
        self.deactivate_user_impl(id).await
    }

    async fn is_active_teacher_user(&self, school_id: i64, user_id: i64) -> Result<bool> {
        self.is_active_teacher_user_impl(school_id, user_id).await
    }

    // 班级模块
    async fn create_class(&self, school_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(school_id, class).await
    }

    async fn get_class(&self, school_id: i64, id: i64) -> Result<Option<Class>> {
        self.get_class_impl(school_id, id).await
    }

    async fn get_class_item(&self, scope: AccessScope, id: i64) -> Result<Option<ClassListItem>> {
        self.get_class_item_impl(scope, id).await
    }

    async fn list_classes(
        &self,
        scope: AccessScope,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<ClassListItem>> {
        self.list_classes_impl(scope, query).await
    }

    async fn class_items(&self, scope: AccessScope) -> Result<Vec<ClassListItem>> {
        self.class_items_impl(scope).await
    }

    async fn class_exists(
        &self,
        school_id: i64,
        name: &str,
        section: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.class_exists_impl(school_id, name, section, academic_year, exclude_id)
            .await
    }

    async fn update_class(&self, id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
        self.update_class_impl(id, update).await
    }

    async fn count_class_students(&self, class_id: i64) -> Result<i64> {
        self.count_class_students_impl(class_id).await
    }

    async fn deactivate_class(&self, id: i64) -> Result<bool> {
        self.deactivate_class_impl(id).await
    }

    async fn get_class_stats(&self, school_id: i64) -> Result<ClassStats> {
        self.get_class_stats_impl(school_id).await
    }

    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<StudentListItem> {
        self.create_student_impl(student).await
    }

    async fn create_students_bulk(
        &self,
        students: Vec<NewStudent>,
    ) -> Result<Vec<StudentListItem>> {
        self.create_students_bulk_impl(students).await
    }

    async fn get_student(&self, scope: AccessScope, id: i64) -> Result<Option<StudentListItem>> {
        self.get_student_impl(scope, id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<StudentListItem>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students(
        &self,
        scope: AccessScope,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<StudentListItem>> {
        self.list_students_impl(scope, query).await
    }

    async fn scoped_students(&self, scope: AccessScope) -> Result<Vec<StudentListItem>> {
        self.scoped_students_impl(scope).await
    }

    async fn students_of_class(&self, class_id: i64) -> Result<Vec<StudentListItem>> {
        self.students_of_class_impl(class_id).await
    }

    async fn recent_students(&self, school_id: i64, limit: u64) -> Result<Vec<StudentListItem>> {
        self.recent_students_impl(school_id, limit).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentListItem>> {
        self.update_student_impl(id, update).await
    }

    async fn deactivate_student(&self, id: i64) -> Result<bool> {
        self.deactivate_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<TeacherListItem> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher(&self, school_id: i64, id: i64) -> Result<Option<TeacherListItem>> {
        self.get_teacher_impl(school_id, id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<TeacherListItem>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<TeacherListItem>> {
        self.list_teachers_impl(school_id, query).await
    }

    async fn active_teachers(&self, school_id: i64) -> Result<Vec<TeacherListItem>> {
        self.active_teachers_impl(school_id).await
    }

    async fn recent_teachers(&self, school_id: i64, limit: u64) -> Result<Vec<TeacherListItem>> {
        self.recent_teachers_impl(school_id, limit).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherListItem>> {
        self.update_teacher_impl(id, update).await
    }

    async fn deactivate_teacher(&self, id: i64) -> Result<bool> {
        self.deactivate_teacher_impl(id).await
    }

    async fn get_teacher_stats(&self, school_id: i64) -> Result<TeacherStats> {
        self.get_teacher_stats_impl(school_id).await
    }

    // 科目模块
    async fn create_subject(
        &self,
        school_id: i64,
        subject: CreateSubjectRequest,
    ) -> Result<Subject> {
        self.create_subject_impl(school_id, subject).await
    }

    async fn get_subject(&self, school_id: i64, id: i64) -> Result<Option<Subject>> {
        self.get_subject_impl(school_id, id).await
    }

    async fn list_subjects(&self, school_id: i64, query: SubjectListQuery) -> Result<Vec<Subject>> {
        self.list_subjects_impl(school_id, query).await
    }

    async fn subject_code_exists(
        &self,
        school_id: i64,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.subject_code_exists_impl(school_id, code, exclude_id)
            .await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn deactivate_subject(&self, id: i64) -> Result<bool> {
        self.deactivate_subject_impl(id).await
    }

    async fn subjects_taught_by(
        &self,
        school_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<SubjectBrief>> {
        self.subjects_taught_by_impl(school_id, teacher_id).await
    }

    // 课表模块
    async fn list_timetable(
        &self,
        scope: AccessScope,
        query: TimetableListQuery,
    ) -> Result<Vec<TimetableEntryView>> {
        self.list_timetable_impl(scope, query).await
    }

    async fn get_timetable_entry(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<TimetableEntry>> {
        self.get_timetable_entry_impl(school_id, id).await
    }

    async fn create_timetable_entry(
        &self,
        school_id: i64,
        slot: TimetableSlot,
    ) -> Result<TimetableEntryView> {
        self.create_timetable_entry_impl(school_id, slot).await
    }

    async fn update_timetable_entry(
        &self,
        school_id: i64,
        id: i64,
        slot: TimetableSlot,
        check_teacher: bool,
    ) -> Result<TimetableEntryView> {
        self.update_timetable_entry_impl(school_id, id, slot, check_teacher)
            .await
    }

    async fn deactivate_timetable_entry(&self, id: i64) -> Result<bool> {
        self.deactivate_timetable_entry_impl(id).await
    }

    async fn get_timetable_stats(
        &self,
        school_id: i64,
        academic_year: &str,
    ) -> Result<TimetableStats> {
        self.get_timetable_stats_impl(school_id, academic_year)
            .await
    }

    // 出勤模块
    async fn mark_attendance(
        &self,
        class_id: i64,
        date: NaiveDate,
        marked_by: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<i64> {
        self.mark_attendance_impl(class_id, date, marked_by, records)
            .await
    }

    async fn get_attendance(
        &self,
        scope: AccessScope,
        id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_impl(scope, id).await
    }

    async fn list_class_attendance(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceView>> {
        self.list_class_attendance_impl(class_id, query).await
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        query: AttendanceListQuery,
    ) -> Result<(PaginatedResponse<AttendanceView>, AttendanceSummary)> {
        self.list_student_attendance_impl(student_id, query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn attendance_facts(
        &self,
        scope: AccessScope,
        filter: FactFilter,
    ) -> Result<Vec<AttendanceFact>> {
        self.attendance_facts_impl(scope, filter).await
    }

    async fn attendance_page(
        &self,
        scope: AccessScope,
        filter: FactFilter,
        pagination: PaginationQuery,
    ) -> Result<PaginatedResponse<AttendanceView>> {
        self.attendance_page_impl(scope, filter, pagination).await
    }

    async fn recent_attendance(
        &self,
        scope: AccessScope,
        limit: u64,
    ) -> Result<Vec<AttendanceView>> {
        self.recent_attendance_impl(scope, limit).await
    }

    // 作业模块
    async fn create_homework(&self, homework: NewHomework) -> Result<HomeworkView> {
        self.create_homework_impl(homework).await
    }

    async fn get_homework(&self, school_id: i64, id: i64) -> Result<Option<HomeworkView>> {
        self.get_homework_impl(school_id, id).await
    }

    async fn list_homework(
        &self,
        scope: AccessScope,
        query: HomeworkListQuery,
    ) -> Result<PaginatedResponse<HomeworkView>> {
        self.list_homework_impl(scope, query).await
    }

    async fn update_homework(
        &self,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<HomeworkView>> {
        self.update_homework_impl(id, update).await
    }

    async fn delete_homework(&self, id: i64) -> Result<bool> {
        self.delete_homework_impl(id).await
    }

    async fn homework_facts(
        &self,
        scope: AccessScope,
        class_id: Option<i64>,
        teacher_id: Option<i64>,
        created_in: Option<DateRange>,
    ) -> Result<Vec<HomeworkFact>> {
        self.homework_facts_impl(scope, class_id, teacher_id, created_in)
            .await
    }

    async fn pending_homework(
        &self,
        scope: AccessScope,
        teacher_id: Option<i64>,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<HomeworkView>> {
        self.pending_homework_impl(scope, teacher_id, now, limit)
            .await
    }

    async fn create_submission(
        &self,
        homework_id: i64,
        student_id: i64,
        content: Option<String>,
        status: SubmissionStatus,
    ) -> Result<HomeworkSubmission> {
        self.create_submission_impl(homework_id, student_id, content, status)
            .await
    }

    async fn submissions_of_student(&self, student_id: i64) -> Result<Vec<HomeworkSubmission>> {
        self.submissions_of_student_impl(student_id).await
    }

    // 成绩模块
    async fn create_grade(&self, grade: NewGrade) -> Result<GradeView> {
        self.create_grade_impl(grade).await
    }

    async fn list_grades(
        &self,
        scope: AccessScope,
        query: GradeListQuery,
        range: Option<DateRange>,
    ) -> Result<PaginatedResponse<GradeView>> {
        self.list_grades_impl(scope, query, range).await
    }

    async fn grade_facts(&self, scope: AccessScope, filter: FactFilter) -> Result<Vec<GradeFact>> {
        self.grade_facts_impl(scope, filter).await
    }

    // 通知模块
    async fn resolve_recipients(
        &self,
        school_id: i64,
        request: &CreateNotificationRequest,
    ) -> Result<Vec<i64>> {
        self.resolve_recipients_impl(school_id, request).await
    }

    async fn create_notifications(&self, notifications: Vec<NewNotification>) -> Result<i64> {
        self.create_notifications_impl(notifications).await
    }

    async fn list_notifications(
        &self,
        school_id: i64,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>> {
        self.list_notifications_impl(school_id, user_id, query)
            .await
    }

    async fn get_notification(&self, school_id: i64, id: i64) -> Result<Option<Notification>> {
        self.get_notification_impl(school_id, id).await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>> {
        self.mark_notification_read_impl(id).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    async fn notifications_since(
        &self,
        school_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Notification>> {
        self.notifications_since_impl(school_id, since).await
    }

    async fn announcements(
        &self,
        school_id: i64,
        class_ids: Vec<i64>,
        limit: u64,
    ) -> Result<Vec<Notification>> {
        self.announcements_impl(school_id, class_ids, limit).await
    }

    // 问答模块
    async fn create_qa(&self, message: NewQaMessage) -> Result<QaView> {
        self.create_qa_impl(message).await
    }

    async fn get_qa(&self, scope: AccessScope, id: i64) -> Result<Option<QaView>> {
        self.get_qa_impl(scope, id).await
    }

    async fn list_qa(
        &self,
        scope: AccessScope,
        query: QaListQuery,
    ) -> Result<PaginatedResponse<QaView>> {
        self.list_qa_impl(scope, query).await
    }

    async fn reply_qa(&self, id: i64, reply: String) -> Result<Option<QaView>> {
        self.reply_qa_impl(id, reply).await
    }

    async fn update_qa_status(&self, id: i64, status: QaStatus) -> Result<Option<QaView>> {
        self.update_qa_status_impl(id, status).await
    }

    async fn delete_qa(&self, id: i64) -> Result<bool> {
        self.delete_qa_impl(id).await
    }

    // 投诉模块
    async fn create_complaint(&self, complaint: NewComplaint) -> Result<ComplaintView> {
        self.create_complaint_impl(complaint).await
    }

    async fn get_complaint(&self, scope: AccessScope, id: i64) -> Result<Option<ComplaintView>> {
        self.get_complaint_impl(scope, id).await
    }

    async fn list_complaints(
        &self,
        scope: AccessScope,
        query: ComplaintListQuery,
    ) -> Result<PaginatedResponse<ComplaintView>> {
        self.list_complaints_impl(scope, query).await
    }

    async fn update_complaint(
        &self,
        id: i64,
        update: UpdateComplaintRequest,
    ) -> Result<Option<ComplaintView>> {
        self.update_complaint_impl(id, update).await
    }

    async fn resolve_complaint(
        &self,
        id: i64,
        resolver_id: i64,
        resolution: String,
    ) -> Result<Option<ComplaintView>> {
        self.resolve_complaint_impl(id, resolver_id, resolution)
            .await
    }

    async fn delete_complaint(&self, id: i64) -> Result<bool> {
        self.delete_complaint_impl(id).await
    }
}
