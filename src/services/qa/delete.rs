use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QaService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn delete_message(
    service: &QaService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if storage.get_qa(scope, message_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found"));
    }

    storage.delete_qa(message_id).await?;
    info!("Q&A message {} deleted by user {}", message_id, user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message deleted successfully")))
}
