use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    match storage.get_student(scope, student_id).await? {
        Some(student) => Ok(HttpResponse::Ok().json(ApiResponse::data(student))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found")),
    }
}
