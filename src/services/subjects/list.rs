use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::SubjectListQuery;
use crate::services::current_user;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let subjects = storage.list_subjects(user.school_id, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(subjects)))
}
