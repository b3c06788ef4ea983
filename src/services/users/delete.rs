use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    if user_id == admin.id {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "You cannot delete your own account",
        ));
    }
    if storage.get_school_user(admin.school_id, user_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "User not found"));
    }

    storage.deactivate_user(user_id).await?;
    info!("User {} deactivated by admin {}", user_id, admin.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
}
