use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_teacher(user.school_id, teacher_id).await? {
        Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::data(teacher))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Teacher not found")),
    }
}
