use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::config::AppConfig;
use crate::models::users::{
    entities::UserRole,
    requests::{CreateParentRequest, NewUser},
    responses::CreatedUserResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_temporary_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn create_parent(
    service: &UserService,
    request: &HttpRequest,
    parent: CreateParentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;

    let email = parent.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, msg));
    }
    if parent.first_name.trim().is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "First name is required",
        ));
    }

    // 指定密码时需满足密码策略，否则生成临时密码
    let (password, temporary_password) = match parent.password {
        Some(password) => {
            let check = validate_password(&password);
            if !check.is_valid {
                return Ok(HttpResponse::UnprocessableEntity().json(
                    ApiResponse::validation_error(
                        "Password does not meet requirements",
                        check.details("password"),
                    ),
                ));
            }
            (password, None)
        }
        None => {
            let generated =
                generate_temporary_password(AppConfig::get().school.temp_password_length);
            (generated.clone(), Some(generated))
        }
    };

    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "User with this email already exists",
        ));
    }

    let password_hash = hash_password(&password)?;
    let user = storage
        .create_user(NewUser {
            school_id: admin.school_id,
            email,
            password_hash,
            role: UserRole::Parent,
            first_name: parent.first_name.trim().to_string(),
            last_name: parent.last_name.trim().to_string(),
            phone: parent.phone,
            date_of_birth: None,
            gender: None,
        })
        .await?;

    info!("Parent user {} created by user {}", user.id, admin.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreatedUserResponse {
            user,
            temporary_password,
        },
        "Parent created successfully",
    )))
}
