use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 接收方类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "notification.ts")]
pub enum RecipientType {
    All,
    Class,
    Parent,
    Teacher,
    Student,
}

impl RecipientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientType::All => "all",
            RecipientType::Class => "class",
            RecipientType::Parent => "parent",
            RecipientType::Teacher => "teacher",
            RecipientType::Student => "student",
        }
    }
}

impl std::str::FromStr for RecipientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(RecipientType::All),
            "class" => Ok(RecipientType::Class),
            "parent" => Ok(RecipientType::Parent),
            "teacher" => Ok(RecipientType::Teacher),
            "student" => Ok(RecipientType::Student),
            _ => Err(format!("Invalid recipient type: {s}")),
        }
    }
}

// 优先级（通知、问答、投诉共用）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "notification.ts")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" | "medium" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

pub const ANNOUNCEMENT_TYPE: &str = "announcement";
pub const DEFAULT_NOTIFICATION_TYPE: &str = "general";

// 通知（每个接收者一行）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "notification.ts")]
pub struct Notification {
    pub id: i64,
    pub school_id: i64,
    pub sender_id: i64,
    pub recipient_id: Option<i64>,
    pub recipient_type: RecipientType,
    pub recipient_class_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub priority: Priority,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
