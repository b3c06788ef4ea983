use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HomeworkService;
use crate::models::homework::requests::{CreateHomeworkRequest, NewHomework};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn create_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    mut homework: CreateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    homework.title = homework.title.trim().to_string();
    if homework.title.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Homework title is required",
        ));
    }
    if homework.max_marks.is_some_and(|m| m <= 0.0) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Max marks must be greater than 0",
        ));
    }

    if storage
        .get_class(user.school_id, homework.class_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }
    if storage
        .get_subject(user.school_id, homework.subject_id)
        .await?
        .is_none()
    {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Subject not found"));
    }

    let created = storage
        .create_homework(NewHomework {
            school_id: user.school_id,
            teacher_id: user.id,
            request: homework,
        })
        .await?;
    info!("Homework {} created by user {}", created.homework.id, user.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Homework created successfully",
    )))
}
