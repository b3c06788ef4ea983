use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if storage.get_school_user(admin.school_id, user_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "User not found"));
    }
    if user_id == admin.id && (update.is_active == Some(false) || update.role.is_some()) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "You cannot change your own role or status",
        ));
    }

    match storage.update_user(user_id, update).await? {
        Some(user) => {
            info!("User {} updated by admin {}", user_id, admin.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "User not found")),
    }
}
