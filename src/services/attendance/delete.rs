use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    record_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if storage.get_attendance(scope, record_id).await?.is_none() {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Attendance record not found",
        ));
    }

    storage.delete_attendance(record_id).await?;
    info!("Attendance record {} deleted by user {}", record_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Attendance record deleted successfully",
    )))
}
