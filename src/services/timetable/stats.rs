use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::TimetableService;
use crate::models::ApiResponse;
use crate::models::timetable::{entities::current_academic_year, requests::AcademicYearQuery};
use crate::services::current_user;

pub async fn get_stats(
    service: &TimetableService,
    request: &HttpRequest,
    query: AcademicYearQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let academic_year = query
        .academic_year
        .unwrap_or_else(|| current_academic_year(Utc::now().date_naive()));
    let stats = storage
        .get_timetable_stats(user.school_id, &academic_year)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(stats)))
}
