use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, normalize_code};
use crate::models::subjects::requests::UpdateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    mut update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage.get_subject(user.school_id, subject_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found"));
    }

    update.name = update.name.map(|n| n.trim().to_string());
    update.code = update.code.as_deref().map(normalize_code);
    if update.name.as_deref() == Some("") || update.code.as_deref() == Some("") {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Subject name and code cannot be empty",
        ));
    }

    if let Some(code) = update.code.as_deref()
        && storage
            .subject_code_exists(user.school_id, code, Some(subject_id))
            .await?
    {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "Subject with this code already exists",
        ));
    }

    match storage.update_subject(subject_id, update).await? {
        Some(subject) => {
            info!("Subject {} updated by user {}", subject_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found")),
    }
}
