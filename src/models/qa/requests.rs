use serde::Deserialize;

use super::entities::QaStatus;
use crate::models::{PaginationQuery, notifications::entities::Priority};
use crate::models::common::query::opt_i64;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQaRequest {
    pub student_id: i64,
    pub message: String,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyQaRequest {
    pub reply: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQaStatusRequest {
    pub status: QaStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<QaStatus>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub student_id: Option<i64>,
}

/// 存储层使用的新问答数据
#[derive(Debug, Clone)]
pub struct NewQaMessage {
    pub parent_id: i64,
    pub class_teacher_id: i64,
    pub student_id: i64,
    pub message: String,
    pub priority: Priority,
}
