use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ComplaintService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn delete_complaint(
    service: &ComplaintService,
    request: &HttpRequest,
    complaint_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if storage.get_complaint(scope, complaint_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found"));
    }

    storage.delete_complaint(complaint_id).await?;
    info!("Complaint {} deleted by user {}", complaint_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
        "Complaint deleted successfully",
    )))
}
