use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage.get_subject(user.school_id, subject_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found"));
    }

    storage.deactivate_subject(subject_id).await?;
    info!("Subject {} deactivated by user {}", subject_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
}
