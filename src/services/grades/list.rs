use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::requests::GradeListQuery;
use crate::services::current_scope;

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let page = storage.list_grades(scope, query, None).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}
