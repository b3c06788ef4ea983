pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod token;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::auth::{
    requests::{
        ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterSchoolRequest,
        UpdateProfileRequest,
    },
    responses::TokenPair,
};
use crate::models::users::entities::User;
use crate::utils::jwt::{JwtUtils, TokenSubject};

super::lazy_storage_service!(AuthService);

impl AuthService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    // 注册学校及管理员
    pub async fn register(
        &self,
        request: &HttpRequest,
        register_request: RegisterSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, request, register_request).await
    }

    // 登录验证
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, login_request).await
    }

    // 刷新 access token
    pub async fn refresh_token(
        &self,
        request: &HttpRequest,
        body: Option<RefreshTokenRequest>,
    ) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request, body).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        update_request: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, request, update_request).await
    }

    pub async fn change_password(
        &self,
        request: &HttpRequest,
        password_request: ChangePasswordRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_change_password(self, request, password_request).await
    }
}

/// 为用户签发令牌对
pub(crate) fn issue_tokens(user: &User) -> Result<TokenPair> {
    let pair = JwtUtils::generate_token_pair(TokenSubject {
        user_id: user.id,
        school_id: user.school_id,
        role: user.role.as_str(),
        email: &user.email,
    })
    .map_err(|e| SchoolError::serialization(format!("Failed to generate token: {e}")))?;

    Ok(TokenPair {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        expires_in: JwtUtils::access_token_ttl_secs(),
    })
}
