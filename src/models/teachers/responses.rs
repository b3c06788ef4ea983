use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Teacher;
use crate::models::users::entities::{UserBrief, UserRole};

// 教师列表项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListItem {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: UserBrief,
    pub role: UserRole,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct CreatedTeacher {
    pub teacher: TeacherListItem,
    pub temporary_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherStats {
    pub total_teachers: i64,
    pub active_teachers: i64,
    pub class_teachers: i64,
    pub average_experience: f64,
}
