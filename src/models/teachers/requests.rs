use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{PaginationQuery, users::requests::NewUser};
use crate::models::common::query::opt_bool;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub employee_id: String,
    pub qualification: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub joining_date: Option<NaiveDate>,
    pub experience_years: Option<i32>,
    pub is_class_teacher: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub employee_id: Option<String>,
    pub qualification: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub is_class_teacher: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_active: Option<bool>,
}

/// 存储层使用的新教师数据（用户 + 档案）
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub user: NewUser,
    pub employee_id: String,
    pub qualification: Option<String>,
    pub subjects: Vec<String>,
    pub joining_date: NaiveDate,
    pub experience_years: i32,
    pub is_class_teacher: bool,
}
