use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComplaintService;
use crate::models::ApiResponse;
use crate::models::complaints::requests::ComplaintListQuery;
use crate::services::current_scope;

pub async fn list_complaints(
    service: &ComplaintService,
    request: &HttpRequest,
    query: ComplaintListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let page = storage.list_complaints(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}
