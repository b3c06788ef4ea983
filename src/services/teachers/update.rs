use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage.get_teacher(user.school_id, teacher_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Teacher not found"));
    }
    if update.experience_years.is_some_and(|years| years < 0) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Experience years cannot be negative",
        ));
    }

    match storage.update_teacher(teacher_id, update).await? {
        Some(teacher) => {
            info!("Teacher {} updated by user {}", teacher_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Teacher not found")),
    }
}
