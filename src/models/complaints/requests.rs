use serde::Deserialize;

use super::entities::ComplaintStatus;
use crate::models::{PaginationQuery, notifications::entities::Priority};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub student_id: i64,
    pub subject: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComplaintRequest {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveComplaintRequest {
    pub resolution: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<ComplaintStatus>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
}

/// 存储层使用的新投诉数据
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub student_id: i64,
    pub complainant_id: i64,
    pub class_teacher_id: Option<i64>,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
}
