use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::{
    requests::MarkAttendanceRequest, responses::MarkAttendanceResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mark_request: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if mark_request.records.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Attendance records are required",
        ));
    }

    if storage
        .get_class_item(scope, mark_request.class_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    // 重复点名与学生归属在存储层事务内检查
    let count = storage
        .mark_attendance(
            mark_request.class_id,
            mark_request.date,
            user.id,
            mark_request.records,
        )
        .await?;

    info!(
        "Attendance marked for class {} on {} by user {} ({} records)",
        mark_request.class_id, mark_request.date, user.id, count
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        MarkAttendanceResponse { count },
        "Attendance marked successfully",
    )))
}
