use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QaService;
use crate::models::qa::requests::{ReplyQaRequest, UpdateQaStatusRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn reply_message(
    service: &QaService,
    request: &HttpRequest,
    message_id: i64,
    reply: ReplyQaRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    let text = reply.reply.trim().to_string();
    if text.is_empty() {
        return Ok(ApiResponse::respond(ErrorCode::BadRequest, "Reply is required"));
    }
    if storage.get_qa(scope, message_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found"));
    }

    match storage.reply_qa(message_id, text).await? {
        Some(message) => {
            info!("Q&A message {} replied by user {}", message_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(message, "Reply sent successfully")))
        }
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found")),
    }
}

pub async fn update_status(
    service: &QaService,
    request: &HttpRequest,
    message_id: i64,
    status: UpdateQaStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    if storage.get_qa(scope, message_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found"));
    }

    match storage.update_qa_status(message_id, status.status).await? {
        Some(message) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            message,
            "Message status updated successfully",
        ))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found")),
    }
}
