use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::PaginationQuery;
use crate::models::common::query::{opt_bool, opt_i64};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeworkRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_marks: Option<f64>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeworkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_marks: Option<f64>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "opt_i64")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub teacher_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_published: Option<bool>,
}

impl HomeworkListQuery {
    pub fn new(pagination: PaginationQuery) -> Self {
        Self {
            pagination,
            class_id: None,
            subject_id: None,
            teacher_id: None,
            is_published: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkStatsQuery {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitHomeworkRequest {
    pub content: Option<String>,
}

/// 存储层使用的新作业数据
#[derive(Debug, Clone)]
pub struct NewHomework {
    pub school_id: i64,
    pub teacher_id: i64,
    pub request: CreateHomeworkRequest,
}
