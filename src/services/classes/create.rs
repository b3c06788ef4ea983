use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::config::AppConfig;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::validate_class_fields;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    class_data.name = class_data.name.trim().to_string();
    class_data.section = class_data.section.trim().to_string();

    let details = validate_class_fields(
        Some(&class_data.name),
        Some(&class_data.section),
        Some(&class_data.academic_year),
        class_data.max_students,
    );
    if !details.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::validation_error("Class data is invalid", details)));
    }

    // 班主任必须是本校有效教师
    if let Some(teacher_id) = class_data.class_teacher_id
        && !storage.is_active_teacher_user(user.school_id, teacher_id).await?
    {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Class teacher must be an active teacher of this school",
        ));
    }

    if storage
        .class_exists(
            user.school_id,
            &class_data.name,
            &class_data.section,
            &class_data.academic_year,
            None,
        )
        .await?
    {
        return Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "Class with this name and section already exists for this academic year",
        ));
    }

    class_data.max_students = Some(
        class_data
            .max_students
            .unwrap_or(AppConfig::get().school.default_max_students),
    );

    let class = storage.create_class(user.school_id, class_data).await?;
    info!("Class {} created by user {}", class.id, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
}
