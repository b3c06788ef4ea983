/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，拒绝已吊销的令牌，
 * 加载用户（先查缓存，再查存储）并拒绝已停用的账号，
 * 最后把 `User` 与 `Claims` 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/classes")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user_claims(&req)` 获取当前用户。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities::{User, UserRole};
use crate::models::{AccessScope, ErrorCode};
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败原因
enum AuthFailure {
    Unauthorized(&'static str),
    Forbidden(&'static str),
    Internal,
}

/// 用户信息缓存键
pub fn user_cache_key(jti: &str) -> String {
    format!("user:{jti}")
}

/// 从请求头中取出 Bearer token
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

async fn authenticate(req: &ServiceRequest) -> Result<(User, Claims), AuthFailure> {
    let token = bearer_token(req.request())
        .ok_or(AuthFailure::Unauthorized("Access token required"))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid or expired token")
    })?;

    let (Some(cache), Some(storage)) = (
        req.app_data::<web::Data<Arc<dyn ObjectCache>>>(),
        req.app_data::<web::Data<Arc<dyn Storage>>>(),
    ) else {
        error!("Cache or storage missing from app data");
        return Err(AuthFailure::Internal);
    };

    if cache.contains(&JwtUtils::revocation_key(&claims.jti)).await {
        debug!("Rejected revoked token {}", claims.jti);
        return Err(AuthFailure::Unauthorized("Token has been revoked"));
    }

    let cache_key = user_cache_key(&claims.jti);
    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok((user, claims)),
            Err(_) => cache.remove(&cache_key).await,
        }
    }

    let user_id = claims
        .user_id()
        .ok_or(AuthFailure::Unauthorized("Invalid token subject"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|err| {
            error!("Failed to load user {}: {}", user_id, err);
            AuthFailure::Internal
        })?
        .ok_or(AuthFailure::Unauthorized("User not found"))?;

    if user.school_id != claims.school_id {
        return Err(AuthFailure::Unauthorized("Invalid token"));
    }
    if !user.is_active {
        return Err(AuthFailure::Forbidden("User account is deactivated"));
    }

    if let Ok(user_json) = serde_json::to_string(&user) {
        let ttl = AppConfig::get()
            .cache
            .default_ttl
            .min(claims.remaining_secs().max(1));
        cache.insert_raw(cache_key, user_json, ttl).await;
    }

    Ok((user, claims))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    actix_web::HttpResponse::NoContent()
                        .finish()
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok((user, claims)) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(claims);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    let (status, code, message) = match failure {
                        AuthFailure::Unauthorized(msg) => {
                            (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg)
                        }
                        AuthFailure::Forbidden(msg) => {
                            (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg)
                        }
                        AuthFailure::Internal => (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        ),
                    };
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user_claims(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }

    /// 当前 access token 的 Claims（注销时使用）
    pub fn extract_token_claims(req: &HttpRequest) -> Option<Claims> {
        req.extensions().get::<Claims>().cloned()
    }

    /// 当前用户的数据访问范围
    pub fn extract_scope(req: &HttpRequest) -> Option<AccessScope> {
        req.extensions().get::<User>().map(AccessScope::for_user)
    }
}
