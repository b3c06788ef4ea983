use serde::Deserialize;

use super::entities::{Priority, RecipientType};
use crate::models::PaginationQuery;
use crate::models::common::query::opt_bool;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    pub recipient_type: RecipientType,
    pub recipient_id: Option<i64>,
    pub recipient_class_id: Option<i64>,
    #[serde(alias = "type")]
    pub notification_type: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "opt_bool")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationStatsQuery {
    /// 统计最近多少天，默认 30
    pub period: Option<i64>,
}

/// 存储层使用的新通知数据（一个接收者一条）
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub school_id: i64,
    pub sender_id: i64,
    pub recipient_id: Option<i64>,
    pub recipient_type: RecipientType,
    pub recipient_class_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub priority: Priority,
}
