use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_subject(user.school_id, subject_id).await? {
        Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::data(subject))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found")),
    }
}
