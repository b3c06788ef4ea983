use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolService;
use crate::models::{ApiResponse, ErrorCode, schools::requests::UpdateSchoolRequest};
use crate::services::current_user;

pub async fn get_profile(
    service: &SchoolService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match storage.get_school_by_id(user.school_id).await? {
        Some(school) => Ok(HttpResponse::Ok().json(ApiResponse::data(school))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "School not found")),
    }
}

pub async fn update_profile(
    service: &SchoolService,
    request: &HttpRequest,
    mut update: UpdateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(ApiResponse::respond(
                ErrorCode::BadRequest,
                "School name cannot be empty",
            ));
        }
    }

    match storage.update_school(user.school_id, update).await? {
        Some(school) => {
            info!("School {} profile updated by user {}", school.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                school,
                "School profile updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "School not found")),
    }
}
