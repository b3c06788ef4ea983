use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage
        .get_notification(user.school_id, notification_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Notification not found",
        ));
    }

    storage.delete_notification(notification_id).await?;
    info!("Notification {} deleted by user {}", notification_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Notification deleted successfully",
    )))
}
