use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, can_view, is_recipient};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage
        .get_notification(user.school_id, notification_id)
        .await?
    {
        Some(notification) if can_view(&user, &notification) => {
            Ok(HttpResponse::Ok().json(ApiResponse::data(notification)))
        }
        _ => Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Notification not found",
        )),
    }
}

pub async fn mark_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let visible = storage
        .get_notification(user.school_id, notification_id)
        .await?
        .is_some_and(|n| is_recipient(&user, &n));
    if !visible {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Notification not found",
        ));
    }

    match storage.mark_notification_read(notification_id).await? {
        Some(notification) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notification,
            "Notification marked as read",
        ))),
        None => Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Notification not found",
        )),
    }
}
