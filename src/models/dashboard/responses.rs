use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{
    attendance::responses::{AttendanceSummary, AttendanceView},
    classes::responses::ClassListItem,
    grades::responses::GradeView,
    homework::responses::{HomeworkView, StudentHomeworkItem},
    notifications::entities::Notification,
    qa::responses::QaView,
    schools::responses::SchoolStats,
    students::responses::StudentListItem,
    teachers::responses::TeacherListItem,
    timetable::responses::TimetableEntryView,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct TeacherLoad {
    pub teacher_id: i64,
    pub name: String,
    pub periods: i64,
    pub classes: i64,
}

// 管理员首页
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct AdminDashboard {
    pub counts: SchoolStats,
    /// 今日出勤率（取整）
    pub today_attendance_percentage: i64,
    pub recent_students: Vec<StudentListItem>,
    pub recent_teachers: Vec<TeacherListItem>,
    pub recent_attendance: Vec<AttendanceView>,
    pub recent_homework: Vec<HomeworkView>,
    pub classes: Vec<ClassListItem>,
    pub teacher_workload: Vec<TeacherLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct ClassTodayStat {
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub student_count: i64,
    pub present_today: i64,
}

// 教师首页
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct TeacherDashboard {
    pub classes: Vec<ClassListItem>,
    pub today_schedule: Vec<TimetableEntryView>,
    pub recent_attendance: Vec<AttendanceView>,
    pub pending_homework: Vec<HomeworkView>,
    pub pending_questions: Vec<QaView>,
    pub class_stats: Vec<ClassTodayStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct ChildOverview {
    pub student: StudentListItem,
    pub attendance: AttendanceSummary,
}

// 家长首页
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct ParentDashboard {
    pub children: Vec<ChildOverview>,
    pub homework: Vec<HomeworkView>,
    pub recent_grades: Vec<GradeView>,
    pub announcements: Vec<Notification>,
    pub questions: Vec<QaView>,
}

// 学生首页
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "dashboard.ts")]
pub struct StudentDashboard {
    pub student: StudentListItem,
    pub attendance: AttendanceSummary,
    pub homework: Vec<StudentHomeworkItem>,
    pub recent_grades: Vec<GradeView>,
    pub today_schedule: Vec<TimetableEntryView>,
}
