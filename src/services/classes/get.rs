use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join;

use super::ClassService;
use crate::models::classes::responses::ClassDetail;
use crate::models::timetable::requests::TimetableListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let Some(class) = storage.get_class_item(scope, class_id).await? else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    };

    let timetable_query = TimetableListQuery {
        class_id: Some(class_id),
        ..Default::default()
    };
    let (students, timetable) = try_join(
        storage.students_of_class(class_id),
        storage.list_timetable(scope, timetable_query),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(ClassDetail {
        class,
        students,
        timetable,
    })))
}
