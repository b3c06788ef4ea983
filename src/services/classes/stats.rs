use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::services::current_user;

pub async fn get_stats(service: &ClassService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let stats = storage.get_class_stats(user.school_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(stats)))
}
