use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QaService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn get_message(
    service: &QaService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    match storage.get_qa(scope, message_id).await? {
        Some(message) => Ok(HttpResponse::Ok().json(ApiResponse::data(message))),
        None => Ok(ApiResponse::respond(ErrorCode::NotFound, "Message not found")),
    }
}
