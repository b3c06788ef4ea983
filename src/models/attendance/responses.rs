use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::AttendanceRecord;
use crate::models::{students::entities::StudentBrief, users::entities::UserBrief};

// 出勤记录（附带学生与点名人）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceView {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub student: Option<StudentBrief>,
    pub marker: Option<UserBrief>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct MarkAttendanceResponse {
    pub count: i64,
}

// 出勤汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub total_days: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendanceResponse {
    pub records: Vec<AttendanceView>,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceStats {
    pub total_records: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub attendance_rate: f64,
    pub period: String,
}
