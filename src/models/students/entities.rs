use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub parent_id: Option<i64>,
    pub roll_number: String,
    pub admission_number: String,
    pub admission_date: NaiveDate,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub father_phone: Option<String>,
    pub mother_phone: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 默认学号：`ADM` + 时间戳
pub fn default_admission_number(now: DateTime<Utc>) -> String {
    format!("ADM{}", now.timestamp_millis())
}

// 关联展示用的精简学生信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct StudentBrief {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: String,
}
