use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::info;

use super::HomeworkService;
use crate::errors::SchoolError;
use crate::models::homework::{entities::SubmissionStatus, requests::SubmitHomeworkRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn submit_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    submission: SubmitHomeworkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let Some(student) = storage.get_student_by_user_id(user.id).await? else {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Student profile not found",
        ));
    };

    // 未发布或不属于本班的作业对学生不可见
    let Some(homework) = storage
        .get_homework(user.school_id, homework_id)
        .await?
        .filter(|h| h.homework.is_published && h.homework.class_id == student.student.class_id)
    else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Homework not found"));
    };

    let status = if homework.homework.is_overdue(Utc::now()) {
        SubmissionStatus::Late
    } else {
        SubmissionStatus::Submitted
    };

    match storage
        .create_submission(homework_id, student.student.id, submission.content, status)
        .await
    {
        Ok(created) => {
            info!(
                "Student {} submitted homework {} ({})",
                student.student.id, homework_id, status
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Homework submitted successfully",
            )))
        }
        Err(SchoolError::Conflict(_)) => Ok(ApiResponse::respond(
            ErrorCode::Conflict,
            "Homework already submitted",
        )),
        Err(e) => Err(e.into()),
    }
}
