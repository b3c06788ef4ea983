use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::notifications::entities::Priority;

// 问答状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "qa.ts")]
pub enum QaStatus {
    Pending,
    Replied,
    Closed,
}

impl QaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QaStatus::Pending => "pending",
            QaStatus::Replied => "replied",
            QaStatus::Closed => "closed",
        }
    }
}

impl std::str::FromStr for QaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QaStatus::Pending),
            "replied" => Ok(QaStatus::Replied),
            "closed" => Ok(QaStatus::Closed),
            _ => Err(format!("Invalid QA status: {s}")),
        }
    }
}

// 家长与班主任之间的问答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "qa.ts")]
pub struct QaMessage {
    pub id: i64,
    pub parent_id: i64,
    pub class_teacher_id: i64,
    pub student_id: i64,
    pub message: String,
    pub reply: Option<String>,
    pub status: QaStatus,
    pub priority: Priority,
    pub replied_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
