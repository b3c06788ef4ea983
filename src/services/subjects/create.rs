use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, normalize_code};
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    subject.name = subject.name.trim().to_string();
    subject.code = normalize_code(&subject.code);
    if subject.name.is_empty() || subject.code.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Subject name and code are required",
        ));
    }

    if storage
        .subject_code_exists(user.school_id, &subject.code, None)
        .await?
    {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "Subject with this code already exists",
        ));
    }

    let created = storage.create_subject(user.school_id, subject).await?;
    info!("Subject {} created by user {}", created.code, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Subject created successfully",
    )))
}
