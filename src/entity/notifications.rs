//! 通知实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub sender_id: i64,
    pub recipient_id: Option<i64>,
    pub recipient_type: String,
    pub recipient_class_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub notification_type: String,
    pub priority: String,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use super::to_datetime;
        use crate::models::notifications::entities::{Notification, Priority, RecipientType};

        Notification {
            id: self.id,
            school_id: self.school_id,
            sender_id: self.sender_id,
            recipient_id: self.recipient_id,
            recipient_type: self
                .recipient_type
                .parse::<RecipientType>()
                .unwrap_or(RecipientType::All),
            recipient_class_id: self.recipient_class_id,
            title: self.title,
            message: self.message,
            notification_type: self.notification_type,
            priority: self.priority.parse::<Priority>().unwrap_or_default(),
            is_read: self.is_read,
            read_at: self.read_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
        }
    }
}
