use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn get_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_homework(user.school_id, homework_id).await? {
        Some(homework) => Ok(HttpResponse::Ok().json(ApiResponse::data(homework))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Homework not found")),
    }
}
