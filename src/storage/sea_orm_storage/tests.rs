//! 基于内存 SQLite 的存储层测试

use super::SeaOrmStorage;
use crate::entity::attendance::ActiveModel as AttendanceActiveModel;
use crate::errors::SchoolError;
use crate::models::{
    AccessScope, PaginationQuery, ScopeKind,
    analytics::facts::FactFilter,
    attendance::{entities::AttendanceStatus, requests::AttendanceEntry},
    classes::requests::{ClassListQuery, CreateClassRequest},
    schools::requests::NewSchool,
    students::requests::{NewStudent, StudentListQuery},
    subjects::requests::CreateSubjectRequest,
    timetable::requests::TimetableSlot,
    users::{entities::UserRole, requests::NewUser},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, Set};

struct Fixture {
    storage: SeaOrmStorage,
    school_id: i64,
    admin_id: i64,
}

fn new_user(school_id: i64, email: &str, role: UserRole) -> NewUser {
    NewUser {
        school_id,
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role,
        first_name: "Test".to_string(),
        last_name: email.split('@').next().unwrap_or("user").to_string(),
        phone: None,
        date_of_birth: None,
        gender: None,
    }
}

async fn register(storage: &SeaOrmStorage, name: &str) -> (i64, i64) {
    let school = NewSchool {
        name: name.to_string(),
        email: format!("office@{name}.test"),
        address: None,
        city: None,
        state: None,
        country: None,
        pincode: None,
        phone: None,
        website: None,
        domain: format!("{name}.school.test"),
        timezone: "UTC".to_string(),
    };
    let (school, admin) = storage
        .register_school_impl(school, new_user(0, &format!("admin@{name}.test"), UserRole::Admin))
        .await
        .unwrap();
    (school.id, admin.id)
}

async fn fixture() -> Fixture {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    let (school_id, admin_id) = register(&storage, "alpha").await;
    Fixture {
        storage,
        school_id,
        admin_id,
    }
}

fn class_request(name: &str, teacher: Option<i64>) -> CreateClassRequest {
    CreateClassRequest {
        name: name.to_string(),
        section: "A".to_string(),
        academic_year: "2025-26".to_string(),
        class_teacher_id: teacher,
        max_students: None,
        room_number: None,
    }
}

fn new_student(school_id: i64, class_id: i64, email: &str, roll: &str) -> NewStudent {
    NewStudent {
        user: new_user(school_id, email, UserRole::Student),
        class_id,
        parent_id: None,
        roll_number: roll.to_string(),
        admission_number: format!("ADM-{roll}-{email}"),
        admission_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        father_name: None,
        mother_name: None,
        father_phone: None,
        mother_phone: None,
        blood_group: None,
        emergency_contact: None,
    }
}

fn slot(class_id: i64, subject_id: i64, teacher_id: i64, period: i32) -> TimetableSlot {
    TimetableSlot {
        class_id,
        subject_id,
        teacher_id,
        day_of_week: 1,
        period_number: period,
        start_time: "09:00".to_string(),
        end_time: "09:45".to_string(),
        room_number: None,
        academic_year: "2025-26".to_string(),
    }
}

#[actix_web::test]
async fn test_register_school_creates_admin() {
    let f = fixture().await;
    let admin = f.storage.get_user_by_id_impl(f.admin_id).await.unwrap().unwrap();
    assert_eq!(admin.school_id, f.school_id);
    assert_eq!(admin.role, UserRole::Admin);
}

#[actix_web::test]
async fn test_register_rolls_back_on_duplicate_admin_email() {
    let f = fixture().await;
    let school = NewSchool {
        name: "beta".to_string(),
        email: "office@beta.test".to_string(),
        address: None,
        city: None,
        state: None,
        country: None,
        pincode: None,
        phone: None,
        website: None,
        domain: "beta.school.test".to_string(),
        timezone: "UTC".to_string(),
    };
    let err = f
        .storage
        .register_school_impl(school, new_user(0, "admin@alpha.test", UserRole::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Conflict(_)));

    // 学校记录随事务回滚
    let school = f.storage.get_school_by_email_impl("office@beta.test").await.unwrap();
    assert!(school.is_none());
}

#[actix_web::test]
async fn test_duplicate_class_is_conflict() {
    let f = fixture().await;
    f.storage
        .create_class_impl(f.school_id, class_request("Grade 5", None))
        .await
        .unwrap();
    let err = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 5", None))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Conflict(_)));

    let exists = f
        .storage
        .class_exists_impl(f.school_id, "Grade 5", "A", "2025-26", None)
        .await
        .unwrap();
    assert!(exists);
}

#[actix_web::test]
async fn test_class_scope_isolation() {
    let f = fixture().await;
    let teacher = f
        .storage
        .create_user_impl(new_user(f.school_id, "ct@alpha.test", UserRole::ClassTeacher))
        .await
        .unwrap();
    let own = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 1", Some(teacher.id)))
        .await
        .unwrap();
    f.storage
        .create_class_impl(f.school_id, class_request("Grade 2", None))
        .await
        .unwrap();

    let (other_school, _) = register(&f.storage, "gamma").await;
    f.storage
        .create_class_impl(other_school, class_request("Grade 1", None))
        .await
        .unwrap();

    let query = ClassListQuery {
        pagination: PaginationQuery::default(),
        academic_year: None,
        is_active: None,
    };

    let admin_view = f
        .storage
        .list_classes_impl(AccessScope::school(f.school_id), query.clone())
        .await
        .unwrap();
    assert_eq!(admin_view.pagination.total, 2);

    let teacher_scope = AccessScope {
        school_id: f.school_id,
        kind: ScopeKind::ClassTeacher(teacher.id),
    };
    let teacher_view = f.storage.list_classes_impl(teacher_scope, query).await.unwrap();
    assert_eq!(teacher_view.items.len(), 1);
    assert_eq!(teacher_view.items[0].class.id, own.id);
    assert_eq!(
        teacher_view.items[0].class_teacher.as_ref().map(|t| t.id),
        Some(teacher.id)
    );
}

#[actix_web::test]
async fn test_class_student_counts_and_stats() {
    let f = fixture().await;
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 3", None))
        .await
        .unwrap();
    let created = f
        .storage
        .create_students_bulk_impl(vec![
            new_student(f.school_id, class.id, "s1@alpha.test", "1"),
            new_student(f.school_id, class.id, "s2@alpha.test", "2"),
        ])
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    assert!(f.storage.deactivate_student_impl(created[1].student.id).await.unwrap());

    // 停用的学生仍计入删除检查
    assert_eq!(f.storage.count_class_students_impl(class.id).await.unwrap(), 2);

    let item = f
        .storage
        .get_class_item_impl(AccessScope::school(f.school_id), class.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.student_count, 1);

    let stats = f.storage.get_class_stats_impl(f.school_id).await.unwrap();
    assert_eq!(stats.total_classes, 1);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.average_capacity, 40.0);
}

#[actix_web::test]
async fn test_student_search_and_parent_scope() {
    let f = fixture().await;
    let parent = f
        .storage
        .create_user_impl(new_user(f.school_id, "parent@alpha.test", UserRole::Parent))
        .await
        .unwrap();
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 4", None))
        .await
        .unwrap();

    let mut child = new_student(f.school_id, class.id, "kid@alpha.test", "7");
    child.parent_id = Some(parent.id);
    f.storage.create_student_impl(child).await.unwrap();
    f.storage
        .create_student_impl(new_student(f.school_id, class.id, "other@alpha.test", "8"))
        .await
        .unwrap();

    let query = StudentListQuery {
        pagination: PaginationQuery::default(),
        class_id: None,
        search: Some("kid".to_string()),
        is_active: None,
    };
    let found = f
        .storage
        .list_students_impl(AccessScope::school(f.school_id), query)
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].student.roll_number, "7");

    let parent_scope = AccessScope {
        school_id: f.school_id,
        kind: ScopeKind::Parent(parent.id),
    };
    let children = f.storage.scoped_students_impl(parent_scope).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].parent.as_ref().map(|p| p.id), Some(parent.id));
}

#[actix_web::test]
async fn test_attendance_marked_twice_is_conflict() {
    let f = fixture().await;
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 6", None))
        .await
        .unwrap();
    let student = f
        .storage
        .create_student_impl(new_student(f.school_id, class.id, "a1@alpha.test", "1"))
        .await
        .unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let records = || {
        vec![AttendanceEntry {
            student_id: student.student.id,
            status: AttendanceStatus::Present,
            remarks: None,
        }]
    };

    let count = f
        .storage
        .mark_attendance_impl(class.id, date, f.admin_id, records())
        .await
        .unwrap();
    assert_eq!(count, 1);

    let err = f
        .storage
        .mark_attendance_impl(class.id, date, f.admin_id, records())
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Conflict(_)));
}

#[actix_web::test]
async fn test_attendance_rejects_student_from_other_class() {
    let f = fixture().await;
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 7", None))
        .await
        .unwrap();
    let other = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 8", None))
        .await
        .unwrap();
    let outsider = f
        .storage
        .create_student_impl(new_student(f.school_id, other.id, "o1@alpha.test", "1"))
        .await
        .unwrap();

    let err = f
        .storage
        .mark_attendance_impl(
            class.id,
            NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            f.admin_id,
            vec![AttendanceEntry {
                student_id: outsider.student.id,
                status: AttendanceStatus::Absent,
                remarks: None,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::BadRequest(_)));
}

#[actix_web::test]
async fn test_attendance_rejects_duplicate_student() {
    let f = fixture().await;
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 11", None))
        .await
        .unwrap();
    let student = f
        .storage
        .create_student_impl(new_student(f.school_id, class.id, "d1@alpha.test", "1"))
        .await
        .unwrap();
    let entry = |status| AttendanceEntry {
        student_id: student.student.id,
        status,
        remarks: None,
    };
    let date = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();

    let err = f
        .storage
        .mark_attendance_impl(
            class.id,
            date,
            f.admin_id,
            vec![entry(AttendanceStatus::Present), entry(AttendanceStatus::Absent)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::BadRequest(_)));

    // 被拒绝后同一天仍可正常点名
    let count = f
        .storage
        .mark_attendance_impl(class.id, date, f.admin_id, vec![entry(AttendanceStatus::Late)])
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[actix_web::test]
async fn test_attendance_facts_skip_unknown_status() {
    let f = fixture().await;
    let class = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 12", None))
        .await
        .unwrap();
    let student = f
        .storage
        .create_student_impl(new_student(f.school_id, class.id, "u1@alpha.test", "1"))
        .await
        .unwrap();
    f.storage
        .mark_attendance_impl(
            class.id,
            NaiveDate::from_ymd_opt(2025, 5, 8).unwrap(),
            f.admin_id,
            vec![AttendanceEntry {
                student_id: student.student.id,
                status: AttendanceStatus::Present,
                remarks: None,
            }],
        )
        .await
        .unwrap();

    // 绕过服务层直接写入无法识别的状态
    AttendanceActiveModel {
        student_id: Set(student.student.id),
        class_id: Set(class.id),
        date: Set(NaiveDate::from_ymd_opt(2025, 5, 9).unwrap()),
        status: Set("tardy".to_string()),
        marked_by: Set(f.admin_id),
        remarks: Set(None),
        created_at: Set(0),
        updated_at: Set(0),
        ..Default::default()
    }
    .insert(&f.storage.db)
    .await
    .unwrap();

    let facts = f
        .storage
        .attendance_facts_impl(AccessScope::school(f.school_id), FactFilter::default())
        .await
        .unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].status, AttendanceStatus::Present);
    assert_eq!(facts[0].date, NaiveDate::from_ymd_opt(2025, 5, 8).unwrap());
}

#[actix_web::test]
async fn test_timetable_slot_conflicts() {
    let f = fixture().await;
    let teacher = f
        .storage
        .create_user_impl(new_user(f.school_id, "st@alpha.test", UserRole::SubjectTeacher))
        .await
        .unwrap();
    let class_a = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 9", None))
        .await
        .unwrap();
    let class_b = f
        .storage
        .create_class_impl(f.school_id, class_request("Grade 10", None))
        .await
        .unwrap();
    let subject = f
        .storage
        .create_subject_impl(
            f.school_id,
            CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
                description: None,
                is_core: Some(true),
            },
        )
        .await
        .unwrap();

    let first = f
        .storage
        .create_timetable_entry_impl(f.school_id, slot(class_a.id, subject.id, teacher.id, 1))
        .await
        .unwrap();
    assert_eq!(first.teacher.as_ref().map(|t| t.id), Some(teacher.id));

    // 同一班级同一节次
    let err = f
        .storage
        .create_timetable_entry_impl(f.school_id, slot(class_a.id, subject.id, f.admin_id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.message(), super::timetables::CLASS_SLOT_CONFLICT);

    // 同一教师同一节次
    let err = f
        .storage
        .create_timetable_entry_impl(f.school_id, slot(class_b.id, subject.id, teacher.id, 1))
        .await
        .unwrap_err();
    assert_eq!(err.message(), super::timetables::TEACHER_SLOT_CONFLICT);

    // 更新自身不算冲突
    let moved = f
        .storage
        .update_timetable_entry_impl(
            f.school_id,
            first.entry.id,
            slot(class_a.id, subject.id, teacher.id, 1),
            true,
        )
        .await
        .unwrap();
    assert_eq!(moved.entry.period_number, 1);

    // 任课教师的班级范围来自课表
    let teacher_scope = AccessScope {
        school_id: f.school_id,
        kind: ScopeKind::SubjectTeacher(teacher.id),
    };
    let classes = f.storage.class_items_impl(teacher_scope).await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].class.id, class_a.id);

    let stats = f
        .storage
        .get_timetable_stats_impl(f.school_id, "2025-26")
        .await
        .unwrap();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.entries_by_day[0].day_of_week, 1);
    assert_eq!(stats.entries_by_day[0].count, 1);
}
