use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if storage.get_student(scope, student_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    }

    // 转班目标同样必须在访问范围内
    if let Some(class_id) = update.class_id
        && storage.get_class_item(scope, class_id).await?.is_none()
    {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    if let Some(parent_id) = update.parent_id {
        match storage.get_school_user(user.school_id, parent_id).await? {
            Some(parent) if parent.role == UserRole::Parent => {}
            _ => {
                return Ok(ApiResponse::respond(
                    ErrorCode::BadRequest,
                    "Parent must be an existing parent user of this school",
                ));
            }
        }
    }

    match storage.update_student(student_id, update).await? {
        Some(student) => {
            info!("Student {} updated by user {}", student_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found")),
    }
}
