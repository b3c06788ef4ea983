//! 聚合计算的输入行
//!
//! 存储层按访问范围过滤后返回这些扁平记录，统计全部在 Rust 中完成。

use chrono::{DateTime, NaiveDate, Utc};

use super::requests::DateRange;
use crate::models::attendance::entities::AttendanceStatus;

/// 事实查询的过滤条件
#[derive(Debug, Clone, Default)]
pub struct FactFilter {
    pub range: Option<DateRange>,
    pub class_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub exam_type: Option<String>,
}

impl FactFilter {
    pub fn in_range(range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceFact {
    pub record_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: i64,
    pub class_name: String,
    pub section: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeFact {
    pub grade_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub percentage: f64,
    pub exam_date: NaiveDate,
    pub exam_type: String,
    pub subject_name: String,
    pub class_name: String,
    pub section: String,
    pub student_name: String,
}

/// 作业及其提交情况
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkFact {
    pub homework_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub is_published: bool,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub submission_count: i64,
    pub marks: Vec<f64>,
}
