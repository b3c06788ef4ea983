use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Class;
use crate::models::{
    students::responses::StudentListItem, timetable::responses::TimetableEntryView,
    users::entities::UserBrief,
};

// 班级列表项（附带班主任与学生人数）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct ClassListItem {
    #[serde(flatten)]
    pub class: Class,
    pub class_teacher: Option<UserBrief>,
    pub student_count: i64,
}

// 班级详情
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: ClassListItem,
    pub students: Vec<StudentListItem>,
    pub timetable: Vec<TimetableEntryView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct ClassStats {
    pub total_classes: i64,
    pub active_classes: i64,
    pub total_students: i64,
    pub classes_with_teachers: i64,
    pub average_capacity: f64,
}
