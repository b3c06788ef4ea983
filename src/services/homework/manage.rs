//! 作业的修改、删除与发布，仅作者本人或管理员可操作

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::HomeworkService;
use crate::models::homework::{requests::UpdateHomeworkRequest, responses::HomeworkView};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::storage::Storage;

/// 读取作业并校验所有权
async fn owned_homework(
    storage: &Arc<dyn Storage>,
    user: &User,
    homework_id: i64,
) -> ActixResult<Result<HomeworkView, HttpResponse>> {
    let Some(homework) = storage.get_homework(user.school_id, homework_id).await? else {
        return Ok(Err(ApiResponse::respond(
            ErrorCode::NotFound,
            "Homework not found",
        )));
    };
    if user.role != UserRole::Admin && homework.homework.teacher_id != user.id {
        return Ok(Err(ApiResponse::respond(
            ErrorCode::Forbidden,
            "You can only edit your own homework",
        )));
    }
    Ok(Ok(homework))
}

pub async fn update_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    mut update: UpdateHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(resp) = owned_homework(&storage, &user, homework_id).await? {
        return Ok(resp);
    }

    update.title = update.title.map(|t| t.trim().to_string());
    if update.title.as_deref() == Some("") {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Homework title cannot be empty",
        ));
    }
    if update.max_marks.is_some_and(|m| m <= 0.0) {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Max marks must be greater than 0",
        ));
    }

    match storage.update_homework(homework_id, update).await? {
        Some(homework) => {
            info!("Homework {} updated by user {}", homework_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                homework,
                "Homework updated successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Homework not found")),
    }
}

pub async fn delete_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    if let Err(resp) = owned_homework(&storage, &user, homework_id).await? {
        return Ok(resp);
    }

    storage.delete_homework(homework_id).await?;
    info!("Homework {} deleted by user {}", homework_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Homework deleted successfully")))
}

pub async fn publish_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    match owned_homework(&storage, &user, homework_id).await? {
        Ok(existing) if existing.homework.is_published => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                existing,
                "Homework is already published",
            )));
        }
        Ok(_) => {}
        Err(resp) => return Ok(resp),
    }

    let update = UpdateHomeworkRequest {
        is_published: Some(true),
        ..Default::default()
    };
    match storage.update_homework(homework_id, update).await? {
        Some(homework) => {
            info!("Homework {} published by user {}", homework_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                homework,
                "Homework published successfully",
            )))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Homework not found")),
    }
}
