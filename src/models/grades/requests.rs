use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::PaginationQuery;
use crate::models::common::query::opt_i64;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub exam_type: String,
    pub exam_name: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "opt_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub subject_id: Option<i64>,
    pub exam_type: Option<String>,
}

/// 存储层使用的新成绩数据（百分比与等级已计算）
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub exam_type: String,
    pub exam_name: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
}
