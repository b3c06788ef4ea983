use serde::Deserialize;

use crate::models::PaginationQuery;
use crate::models::common::query::opt_bool;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub name: String,
    pub section: String,
    pub academic_year: String,
    pub class_teacher_id: Option<i64>,
    pub max_students: Option<i32>,
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub class_teacher_id: Option<i64>,
    pub max_students: Option<i32>,
    pub room_number: Option<String>,
    pub is_active: Option<bool>,
}

// 班级列表查询参数
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_active: Option<bool>,
}
