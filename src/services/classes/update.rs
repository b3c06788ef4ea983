use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;
use crate::utils::validate::validate_class_fields;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    // 班主任只能修改自己负责的班级
    let Some(existing) = storage.get_class_item(scope, class_id).await? else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    };
    let existing = existing.class;

    update_data.name = update_data.name.map(|s| s.trim().to_string());
    update_data.section = update_data.section.map(|s| s.trim().to_string());

    let details = validate_class_fields(
        update_data.name.as_deref(),
        update_data.section.as_deref(),
        update_data.academic_year.as_deref(),
        update_data.max_students,
    );
    if !details.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::validation_error("Class data is invalid", details)));
    }

    if let Some(teacher_id) = update_data.class_teacher_id
        && !storage.is_active_teacher_user(user.school_id, teacher_id).await?
    {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Class teacher must be an active teacher of this school",
        ));
    }

    // 名称、班别或学年变化时重新检查唯一性
    if update_data.name.is_some()
        || update_data.section.is_some()
        || update_data.academic_year.is_some()
    {
        let name = update_data.name.as_deref().unwrap_or(&existing.name);
        let section = update_data.section.as_deref().unwrap_or(&existing.section);
        let year = update_data
            .academic_year
            .as_deref()
            .unwrap_or(&existing.academic_year);
        if storage
            .class_exists(user.school_id, name, section, year, Some(class_id))
            .await?
        {
            return Ok(ApiResponse::respond(
                ErrorCode::Conflict,
                "Class with this name and section already exists for this academic year",
            ));
        }
    }

    match storage.update_class(class_id, update_data).await? {
        Some(class) => {
            info!("Class {} updated by user {}", class_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found")),
    }
}
