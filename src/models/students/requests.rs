use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{PaginationQuery, users::requests::NewUser};
use crate::models::common::query::{opt_bool, opt_i64};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub class_id: i64,
    pub parent_id: Option<i64>,
    pub roll_number: String,
    pub admission_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub father_phone: Option<String>,
    pub mother_phone: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub class_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub roll_number: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub father_phone: Option<String>,
    pub mother_phone: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "opt_i64")]
    pub class_id: Option<i64>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_active: Option<bool>,
}

/// 存储层使用的新学生数据（用户 + 档案）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub user: NewUser,
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
}
