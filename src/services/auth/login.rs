use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AuthService, issue_tokens};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::AuthResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let email = login_request.email.trim().to_lowercase();

    // 1. 查找用户并校验密码
    let Some(user) = storage.get_user_by_email(&email).await? else {
        return Ok(ApiResponse::respond(
            ErrorCode::Unauthorized,
            INVALID_CREDENTIALS,
        ));
    };
    if !verify_password(&login_request.password, &user.password_hash) {
        info!("Failed login attempt for user {}", user.id);
        return Ok(ApiResponse::respond(
            ErrorCode::Unauthorized,
            INVALID_CREDENTIALS,
        ));
    }

    // 2. 账号与学校必须有效
    if !user.is_active {
        return Ok(ApiResponse::respond(
            ErrorCode::Forbidden,
            "User account is deactivated",
        ));
    }
    let school = match storage.get_school_by_id(user.school_id).await? {
        Some(school) if school.is_active => school,
        _ => {
            return Ok(ApiResponse::respond(
                ErrorCode::Forbidden,
                "School account is inactive",
            ));
        }
    };

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 签发令牌
    let tokens = issue_tokens(&user)?;
    info!("User {} logged in successfully", user.id);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&tokens.refresh_token);
    Ok(HttpResponse::Ok().cookie(refresh_cookie).json(ApiResponse::success(
        AuthResponse {
            user,
            school,
            tokens,
        },
        "Login successful",
    )))
}
