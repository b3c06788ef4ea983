use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::{ChangePasswordRequest, UpdateProfileRequest},
        responses::ProfileResponse,
    },
    users::requests::UpdateUserRequest,
};
use crate::services::current_user;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

pub async fn handle_get_profile(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let school = storage.get_school_by_id(user.school_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(ProfileResponse { user, school })))
}

pub async fn handle_update_profile(
    service: &AuthService,
    request: &HttpRequest,
    update_request: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let first_name = update_request.first_name.map(|s| s.trim().to_string());
    let last_name = update_request.last_name.map(|s| s.trim().to_string());
    if first_name.as_deref() == Some("") || last_name.as_deref() == Some("") {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Name fields cannot be empty",
        ));
    }

    // 个人资料只允许修改姓名与电话
    let update = UpdateUserRequest {
        first_name,
        last_name,
        phone: update_request.phone,
        ..Default::default()
    };
    let updated = storage
        .update_user(user.id, update)
        .await?
        .ok_or_else(|| SchoolError::not_found("User not found"))?;

    forget_cached_user(service, request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profile updated successfully")))
}

pub async fn handle_change_password(
    service: &AuthService,
    request: &HttpRequest,
    password_request: ChangePasswordRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    // 缓存中的用户不含密码哈希，需从库中重新读取
    let stored = storage
        .get_user_by_id(user.id)
        .await?
        .ok_or_else(|| SchoolError::not_found("User not found"))?;

    if !verify_password(&password_request.current_password, &stored.password_hash) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Current password is incorrect",
        ));
    }

    let check = validate_password(&password_request.new_password);
    if !check.is_valid {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::validation_error(
            "Password does not meet requirements",
            check.details("newPassword"),
        )));
    }

    let password_hash = hash_password(&password_request.new_password)?;
    storage.update_user_password(user.id, password_hash).await?;
    forget_cached_user(service, request).await;

    info!("User {} changed password", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
}

async fn forget_cached_user(service: &AuthService, request: &HttpRequest) {
    if let (Some(cache), Some(claims)) = (
        service.get_cache(request),
        RequireJWT::extract_token_claims(request),
    ) {
        cache.remove(&user_cache_key(&claims.jti)).await;
    }
}
