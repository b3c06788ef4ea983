use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 吊销当前 access token 直到其过期，并清除 refresh cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(claims) = RequireJWT::extract_token_claims(request) {
        match service.get_cache(request) {
            Some(cache) => {
                let ttl = claims.remaining_secs().max(1);
                cache
                    .insert_raw(JwtUtils::revocation_key(&claims.jti), "1".to_string(), ttl)
                    .await;
                cache.remove(&user_cache_key(&claims.jti)).await;
                info!("User {} logged out", claims.sub);
            }
            None => warn!("Object cache unavailable, token {} not revoked", claims.jti),
        }
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logged out successfully")))
}
