use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, info};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::RefreshTokenRequest, responses::RefreshResponse},
};
use crate::utils::jwt::{JwtUtils, TokenSubject};

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
    body: Option<RefreshTokenRequest>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 请求体优先，其次 Cookie
    let Some(refresh_token) = body
        .and_then(|b| b.refresh_token)
        .filter(|t| !t.is_empty())
        .or_else(|| JwtUtils::extract_refresh_token_from_cookie(request))
    else {
        return Ok(ApiResponse::respond(
            ErrorCode::Unauthorized,
            "Refresh token required",
        ));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Refresh token rejected: {}", e);
            return Ok(ApiResponse::respond(
                ErrorCode::Unauthorized,
                "Invalid or expired refresh token",
            ));
        }
    };

    let user = match claims.user_id() {
        Some(user_id) => storage.get_user_by_id(user_id).await?,
        None => None,
    };
    let Some(user) = user.filter(|u| u.is_active && u.school_id == claims.school_id) else {
        return Ok(ApiResponse::respond(
            ErrorCode::Unauthorized,
            "Invalid or expired refresh token",
        ));
    };

    let access_token = match JwtUtils::generate_access_token(TokenSubject {
        user_id: user.id,
        school_id: user.school_id,
        role: user.role.as_str(),
        email: &user.email,
    }) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            return Ok(ApiResponse::respond(
                ErrorCode::InternalServerError,
                "Unable to refresh token",
            ));
        }
    };

    info!("Access token refreshed for user {}", user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshResponse {
            access_token,
            expires_in: JwtUtils::access_token_ttl_secs(),
        },
        "Token refreshed",
    )))
}
