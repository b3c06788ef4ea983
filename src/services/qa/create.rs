use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QaService;
use crate::models::qa::requests::{CreateQaRequest, NewQaMessage};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn create_message(
    service: &QaService,
    request: &HttpRequest,
    message: CreateQaRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    let text = message.message.trim().to_string();
    if text.is_empty() {
        return Ok(ApiResponse::respond(
            ErrorCode::BadRequest,
            "Message is required",
        ));
    }

    // 家长只能看到自己的孩子，班主任只能看到本班学生
    let Some(student) = storage.get_student(scope, message.student_id).await? else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Student not found"));
    };

    let (parent_id, class_teacher_id) = match user.role {
        UserRole::Parent => {
            let teacher_id = storage
                .get_class(user.school_id, student.student.class_id)
                .await?
                .and_then(|class| class.class_teacher_id);
            match teacher_id {
                Some(teacher_id) => (user.id, teacher_id),
                None => {
                    return Ok(ApiResponse::respond(
                        ErrorCode::BadRequest,
                        "No class teacher assigned to this student's class",
                    ));
                }
            }
        }
        _ => match student.student.parent_id {
            Some(parent_id) => (parent_id, user.id),
            None => {
                return Ok(ApiResponse::respond(
                    ErrorCode::BadRequest,
                    "No parent linked to this student",
                ));
            }
        },
    };

    let created = storage
        .create_qa(NewQaMessage {
            parent_id,
            class_teacher_id,
            student_id: student.student.id,
            message: text,
            priority: message.priority.unwrap_or_default(),
        })
        .await?;
    info!(
        "Q&A message {} created by user {} for student {}",
        created.message.id, user.id, student.student.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Message sent successfully",
    )))
}
