use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TimetableService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_entry(
    service: &TimetableService,
    request: &HttpRequest,
    entry_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage
        .get_timetable_entry(user.school_id, entry_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Timetable entry not found",
        ));
    }

    storage.deactivate_timetable_entry(entry_id).await?;
    info!("Timetable entry {} deactivated by user {}", entry_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Timetable entry deleted successfully",
    )))
}
