use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::requests::DateRange;
use crate::models::{
    attendance::responses::AttendanceView, classes::responses::ClassListItem,
    grades::responses::GradeView, schools::entities::School, schools::responses::SchoolStats,
    students::responses::StudentListItem, teachers::responses::TeacherListItem,
};

// ---------- 出勤分析 ----------

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct AttendanceOverview {
    pub total_records: i64,
    pub period: i64,
    pub date_range: DateRange,
    pub overall_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct ClassAttendanceStat {
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct StudentAttendanceStat {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct AttendanceAnalytics {
    pub overview: AttendanceOverview,
    pub by_status: Vec<StatusCount>,
    pub daily_trends: Vec<DailyTrend>,
    pub class_wise_stats: Vec<ClassAttendanceStat>,
    pub student_wise_stats: Vec<StudentAttendanceStat>,
    pub records: Vec<AttendanceView>,
}

// ---------- 成绩分析 ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct PerformanceOverview {
    pub total_records: i64,
    pub average_percentage: f64,
    pub min_percentage: f64,
    pub max_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct GroupPerformance {
    pub id: i64,
    pub name: String,
    pub exam_count: i64,
    pub average_percentage: f64,
    pub min_percentage: f64,
    pub max_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct PerformanceAnalytics {
    pub overview: PerformanceOverview,
    pub period: i64,
    pub date_range: DateRange,
    pub subject_wise_stats: Vec<GroupPerformance>,
    pub class_wise_stats: Vec<GroupPerformance>,
    pub student_wise_stats: Vec<GroupPerformance>,
    pub records: Vec<GradeView>,
}

// ---------- 班级分析 ----------

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct ClassAnalyticsItem {
    pub class: ClassListItem,
    pub attendance_percentage: f64,
    pub homework_total: i64,
    pub homework_published: i64,
    pub homework_pending: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct ClassAnalytics {
    pub total_classes: i64,
    pub period: i64,
    pub date_range: DateRange,
    pub classes: Vec<ClassAnalyticsItem>,
}

// ---------- 教师分析 ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct TeacherWorkload {
    pub working_days: i64,
    pub total_periods: i64,
    pub classes_taught: i64,
    pub subjects_taught: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct TeacherAnalyticsItem {
    pub teacher: TeacherListItem,
    pub classes_as_class_teacher: i64,
    pub timetable_periods: i64,
    pub homework_created: i64,
    pub attendance_marked: i64,
    pub workload: TeacherWorkload,
    pub homework_completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct TeacherAnalytics {
    pub total_teachers: i64,
    pub period: i64,
    pub date_range: DateRange,
    pub teachers: Vec<TeacherAnalyticsItem>,
}

// ---------- 学生分析 ----------

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct StudentAnalyticsItem {
    pub student: StudentListItem,
    pub attendance_percentage: f64,
    pub average_grade_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct StudentAnalytics {
    pub total_students: i64,
    pub period: i64,
    pub date_range: DateRange,
    pub students: Vec<StudentAnalyticsItem>,
}

// ---------- 学校总览 ----------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct AttendanceTotals {
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct RecentActivity {
    pub activity_type: String,
    pub record_id: i64,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "analytics.ts")]
pub struct SchoolAnalytics {
    pub school: School,
    pub overview: SchoolStats,
    pub period: i64,
    pub date_range: DateRange,
    pub attendance_overview: AttendanceTotals,
    pub performance_overview: PerformanceOverview,
    pub recent_activities: Vec<RecentActivity>,
}
