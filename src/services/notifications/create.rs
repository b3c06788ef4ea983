use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use crate::models::notifications::{
    entities::{DEFAULT_NOTIFICATION_TYPE, RecipientType},
    requests::{CreateNotificationRequest, NewNotification},
    responses::CreatedNotifications,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn create_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification: CreateNotificationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if notification.title.trim().is_empty() || notification.message.trim().is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Title and message are required",
        ));
    }
    match notification.recipient_type {
        RecipientType::Class => {
            let Some(class_id) = notification.recipient_class_id else {
                return Ok(ApiResponse::respond(
                    ErrorCode::BadRequest,
                    "recipientClassId is required for class notifications",
                ));
            };
            // 班主任只能通知自己的班级
            if storage.get_class_item(scope, class_id).await?.is_none() {
                return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
            }
        }
        RecipientType::Parent | RecipientType::Teacher | RecipientType::Student => {
            if notification.recipient_id.is_none() {
                return Ok(ApiResponse::respond(
                    ErrorCode::BadRequest,
                    "recipientId is required for individual notifications",
                ));
            }
        }
        RecipientType::All => {}
    }

    let recipient_ids = storage
        .resolve_recipients(user.school_id, &notification)
        .await?;
    if recipient_ids.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "No recipients found for this notification",
        ));
    }

    let notification_type = notification
        .notification_type
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string());
    let priority = notification.priority.unwrap_or_default();
    let rows = recipient_ids
        .iter()
        .map(|&recipient_id| NewNotification {
            school_id: user.school_id,
            sender_id: user.id,
            recipient_id: Some(recipient_id),
            recipient_type: notification.recipient_type,
            recipient_class_id: notification.recipient_class_id,
            title: notification.title.trim().to_string(),
            message: notification.message.clone(),
            notification_type: notification_type.clone(),
            priority,
        })
        .collect();

    let count = storage.create_notifications(rows).await?;
    info!(
        "User {} sent notification to {} recipients ({})",
        user.id,
        count,
        notification.recipient_type.as_str()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreatedNotifications {
            count,
            recipient_ids,
        },
        "Notification sent successfully",
    )))
}
