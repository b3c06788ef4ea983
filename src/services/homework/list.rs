use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::models::homework::requests::HomeworkListQuery;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::current_scope;

pub async fn list_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    query: HomeworkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let page = storage.list_homework(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn list_class_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    class_id: i64,
    pagination: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    if storage.get_class_item(scope, class_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    let query = HomeworkListQuery {
        class_id: Some(class_id),
        ..HomeworkListQuery::new(pagination)
    };
    let page = storage.list_homework(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}

pub async fn list_teacher_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    teacher_id: i64,
    pagination: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let query = HomeworkListQuery {
        teacher_id: Some(teacher_id),
        ..HomeworkListQuery::new(pagination)
    };
    let page = storage.list_homework(scope, query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated(page.items, page.pagination)))
}
