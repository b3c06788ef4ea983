use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AuthService, issue_tokens};
use crate::models::{
    ApiResponse, ErrorCode, ValidationDetail,
    auth::{requests::RegisterSchoolRequest, responses::AuthResponse},
    schools::{entities::school_domain, requests::NewSchool},
    users::{entities::UserRole, requests::NewUser},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    register_request: RegisterSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let name = register_request.name.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    let mut details = Vec::new();
    if name.is_empty() {
        details.push(ValidationDetail::new("name", "School name is required"));
    }
    if let Err(msg) = validate_email(&email) {
        details.push(ValidationDetail::new("email", msg));
    }
    let password_check = validate_password(&register_request.password);
    if !password_check.is_valid {
        details.extend(password_check.details("password"));
    }
    if !details.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::validation_error(
            "Registration data is invalid",
            details,
        )));
    }

    // 学校邮箱与管理员邮箱都必须未被使用
    if storage.get_school_by_email(&email).await?.is_some() {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "School with this email already exists",
        ));
    }
    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "User with this email already exists",
        ));
    }

    let password_hash = hash_password(&register_request.password)?;
    let school = NewSchool {
        domain: school_domain(&name, &config.school.domain_suffix),
        name: name.clone(),
        email: email.clone(),
        address: register_request.address,
        city: register_request.city,
        state: register_request.state,
        country: register_request.country,
        pincode: register_request.pincode,
        phone: register_request.phone.clone(),
        website: register_request.website,
        timezone: register_request
            .timezone
            .unwrap_or_else(|| config.school.default_timezone.clone()),
    };
    let admin = NewUser {
        school_id: 0,
        email,
        password_hash,
        role: UserRole::Admin,
        first_name: "Admin".to_string(),
        last_name: name,
        phone: register_request.phone,
        date_of_birth: None,
        gender: None,
    };

    let (school, user) = storage.register_school(school, admin).await?;
    let tokens = issue_tokens(&user)?;

    info!(
        "School {} registered with admin user {}",
        school.id, user.id
    );

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&tokens.refresh_token);
    Ok(HttpResponse::Created().cookie(refresh_cookie).json(ApiResponse::success(
        AuthResponse {
            user,
            school,
            tokens,
        },
        "School registered successfully",
    )))
}
