use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: Option<String>,
    /// 可教授的科目名称
    pub subjects: Vec<String>,
    pub joining_date: NaiveDate,
    pub experience_years: i32,
    pub is_class_teacher: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
