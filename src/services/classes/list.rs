use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::requests::ClassListQuery;
use crate::services::current_scope;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let page = storage.list_classes(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}
