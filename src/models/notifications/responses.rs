use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Notification;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "notification.ts")]
pub struct CreatedNotifications {
    pub count: i64,
    pub recipient_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationStats {
    pub period_days: i64,
    pub total: i64,
    pub unread: i64,
    pub by_type: BTreeMap<String, i64>,
    pub by_priority: BTreeMap<String, i64>,
}

impl NotificationStats {
    pub fn from_notifications(period_days: i64, notifications: &[Notification]) -> Self {
        let mut stats = NotificationStats {
            period_days,
            total: notifications.len() as i64,
            ..Default::default()
        };
        for n in notifications {
            if !n.is_read {
                stats.unread += 1;
            }
            *stats
                .by_type
                .entry(n.notification_type.clone())
                .or_default() += 1;
            *stats
                .by_priority
                .entry(n.priority.as_str().to_string())
                .or_default() += 1;
        }
        stats
    }
}
