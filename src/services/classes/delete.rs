use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if storage.get_class(user.school_id, class_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    // 停用的学生也算在内
    if storage.count_class_students(class_id).await? > 0 {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Cannot delete class with existing students",
        ));
    }

    storage.deactivate_class(class_id).await?;
    info!("Class {} deactivated by user {}", class_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
}
