pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::{
    entities::{Notification, RecipientType},
    requests::{CreateNotificationRequest, NotificationListQuery, NotificationStatsQuery},
};
use crate::models::users::entities::{User, UserRole};

super::lazy_storage_service!(NotificationService);

impl NotificationService {
    // 按接收方类型展开为多条通知
    pub async fn create_notification(
        &self,
        request: &HttpRequest,
        notification: CreateNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notification(self, request, notification).await
    }

    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, query).await
    }

    pub async fn get_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_notification(self, request, notification_id).await
    }

    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::mark_read(self, request, notification_id).await
    }

    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notification(self, request, notification_id).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: NotificationStatsQuery,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }
}

/// 接收者本人、发送者和管理员可以查看
pub(crate) fn can_view(user: &User, notification: &Notification) -> bool {
    user.role == UserRole::Admin
        || notification.sender_id == user.id
        || is_recipient(user, notification)
}

/// 只有接收者可以标记已读
pub(crate) fn is_recipient(user: &User, notification: &Notification) -> bool {
    match notification.recipient_id {
        Some(id) => id == user.id,
        None => notification.recipient_type == RecipientType::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::Priority;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            school_id: 1,
            email: format!("u{id}@example.com"),
            password_hash: String::new(),
            role,
            first_name: "Test".into(),
            last_name: "User".into(),
            phone: None,
            date_of_birth: None,
            gender: None,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn notification(sender_id: i64, recipient_id: Option<i64>) -> Notification {
        Notification {
            id: 1,
            school_id: 1,
            sender_id,
            recipient_id,
            recipient_type: RecipientType::All,
            recipient_class_id: None,
            title: "Holiday".into(),
            message: "School closed".into(),
            notification_type: "general".into(),
            priority: Priority::Normal,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility_rules() {
        let n = notification(1, Some(5));
        assert!(can_view(&user(5, UserRole::Parent), &n));
        assert!(can_view(&user(1, UserRole::ClassTeacher), &n));
        assert!(can_view(&user(9, UserRole::Admin), &n));
        assert!(!can_view(&user(6, UserRole::Student), &n));

        assert!(is_recipient(&user(5, UserRole::Parent), &n));
        assert!(!is_recipient(&user(1, UserRole::ClassTeacher), &n));
        assert!(is_recipient(&user(6, UserRole::Student), &notification(1, None)));
    }
}
