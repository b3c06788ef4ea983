use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::ApiResponse;
use crate::services::current_user;

pub async fn get_stats(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let stats = storage.get_teacher_stats(user.school_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(stats)))
}
