use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComplaintService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn get_complaint(
    service: &ComplaintService,
    request: &HttpRequest,
    complaint_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    match storage.get_complaint(scope, complaint_id).await? {
        Some(complaint) => Ok(HttpResponse::Ok().json(ApiResponse::data(complaint))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found")),
    }
}
