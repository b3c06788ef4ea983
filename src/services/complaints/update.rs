use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ComplaintService;
use crate::models::complaints::requests::{ResolveComplaintRequest, UpdateComplaintRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn update_complaint(
    service: &ComplaintService,
    request: &HttpRequest,
    complaint_id: i64,
    mut update: UpdateComplaintRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    update.category = update
        .category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());
    if update.status.is_none() && update.priority.is_none() && update.category.is_none() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "No fields to update",
        ));
    }
    if storage.get_complaint(scope, complaint_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found"));
    }

    match storage.update_complaint(complaint_id, update).await? {
        Some(complaint) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            complaint,
            "Complaint updated successfully",
        ))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found")),
    }
}

pub async fn resolve_complaint(
    service: &ComplaintService,
    request: &HttpRequest,
    complaint_id: i64,
    resolve: ResolveComplaintRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    let resolution = resolve.resolution.trim().to_string();
    if resolution.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Resolution is required",
        ));
    }
    if storage.get_complaint(scope, complaint_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found"));
    }

    match storage
        .resolve_complaint(complaint_id, user.id, resolution)
        .await?
    {
        Some(complaint) => {
            info!("Complaint {} resolved by user {}", complaint_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                complaint,
                "Complaint resolved successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Complaint not found")),
    }
}
