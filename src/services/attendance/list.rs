use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::{
    requests::AttendanceListQuery, responses::StudentAttendanceResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn list_class_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    if storage.get_class_item(scope, class_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    let page = storage.list_class_attendance(class_id, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn list_student_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    student_id: i64,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    if storage.get_student(scope, student_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    }

    let (page, summary) = storage.list_student_attendance(student_id, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        StudentAttendanceResponse {
            records: page.items,
            summary,
        },
        page.pagination,
    )))
}
