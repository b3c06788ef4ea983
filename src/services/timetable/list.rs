use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::ApiResponse;
use crate::models::timetable::requests::TimetableListQuery;
use crate::services::current_scope;

pub async fn list_timetable(
    service: &TimetableService,
    request: &HttpRequest,
    query: TimetableListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let entries = storage.list_timetable(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(entries)))
}
