use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QaService;
use crate::models::ApiResponse;
use crate::models::qa::requests::QaListQuery;
use crate::services::current_scope;

pub async fn list_messages(
    service: &QaService,
    request: &HttpRequest,
    query: QaListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let page = storage.list_qa(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}
