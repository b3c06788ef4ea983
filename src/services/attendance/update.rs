use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    record_id: i64,
    update: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if update.status.is_none() && update.remarks.is_none() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Nothing to update",
        ));
    }
    if storage.get_attendance(scope, record_id).await?.is_none() {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Attendance record not found",
        ));
    }

    match storage.update_attendance(record_id, update).await? {
        Some(record) => {
            info!("Attendance record {} updated by user {}", record_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Attendance record not found",
        )),
    }
}
