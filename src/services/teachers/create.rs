use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::TeacherService;
use crate::config::AppConfig;
use crate::models::teachers::{
    requests::{CreateTeacherRequest, NewTeacher},
    responses::CreatedTeacher,
};
use crate::models::users::{entities::UserRole, requests::NewUser};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_temporary_password;
use crate::utils::validate::validate_email;

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let email = teacher.email.trim().to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, msg));
    }
    if teacher.first_name.trim().is_empty() || teacher.employee_id.trim().is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "First name and employee ID are required",
        ));
    }
    if teacher.experience_years.is_some_and(|years| years < 0) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Experience years cannot be negative",
        ));
    }
    if storage.get_user_by_email(&email).await?.is_some() {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "User with this email already exists",
        ));
    }

    let is_class_teacher = teacher.is_class_teacher.unwrap_or(false);
    let role = if is_class_teacher {
        UserRole::ClassTeacher
    } else {
        UserRole::SubjectTeacher
    };

    let temporary_password =
        generate_temporary_password(AppConfig::get().school.temp_password_length);
    let password_hash = hash_password(&temporary_password)?;

    let new_teacher = NewTeacher {
        user: NewUser {
            school_id: user.school_id,
            email,
            password_hash,
            role,
            first_name: teacher.first_name.trim().to_string(),
            last_name: teacher.last_name.trim().to_string(),
            phone: teacher.phone,
            date_of_birth: None,
            gender: None,
        },
        employee_id: teacher.employee_id.trim().to_string(),
        qualification: teacher.qualification,
        subjects: teacher.subjects,
        joining_date: teacher
            .joining_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        experience_years: teacher.experience_years.unwrap_or(0),
        is_class_teacher,
    };

    let created = storage.create_teacher(new_teacher).await?;
    info!(
        "Teacher {} ({}) created by user {}",
        created.teacher.id, role, user.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreatedTeacher {
            teacher: created,
            temporary_password,
        },
        "Teacher created successfully",
    )))
}
