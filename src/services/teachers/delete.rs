use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage.get_teacher(user.school_id, teacher_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Teacher not found"));
    }

    storage.deactivate_teacher(teacher_id).await?;
    info!("Teacher {} deactivated by user {}", teacher_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
}
