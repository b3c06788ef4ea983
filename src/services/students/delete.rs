use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if storage.get_student(scope, student_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    }

    storage.deactivate_student(student_id).await?;
    info!("Student {} deactivated by user {}", student_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
}
