use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::TimetableEntry;
use crate::models::{
    classes::entities::ClassBrief, subjects::entities::SubjectBrief, users::entities::UserBrief,
};

// 课表条目（附带班级、科目、教师信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableEntryView {
    #[serde(flatten)]
    pub entry: TimetableEntry,
    pub class: Option<ClassBrief>,
    pub subject: Option<SubjectBrief>,
    pub teacher: Option<UserBrief>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct DaySchedule {
    pub day_of_week: i32,
    pub day_name: String,
    pub periods: Vec<TimetableEntryView>,
}

// 周课表（周一到周日）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct WeeklyTimetable {
    pub academic_year: String,
    pub days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct DayCount {
    pub day_of_week: i32,
    pub day_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableStats {
    pub academic_year: String,
    pub total_entries: i64,
    pub classes_with_timetable: i64,
    pub teachers_with_timetable: i64,
    pub entries_by_day: Vec<DayCount>,
}
