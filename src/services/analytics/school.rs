use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{NaiveTime, Utc};
use futures_util::future::{join, try_join, try_join4};

use super::aggregate::{
    RECENT_ACTIVITIES, attendance_totals, performance_overview, recent_activities,
};
use super::{AnalyticsService, grades_or_default};
use crate::models::analytics::{
    facts::FactFilter, requests::AnalyticsQuery, responses::SchoolAnalytics,
};
use crate::models::{AccessScope, ApiResponse, ErrorCode};
use crate::services::current_user;

pub async fn school_analytics(
    service: &AnalyticsService,
    request: &HttpRequest,
    query: AnalyticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let scope = AccessScope::school(user.school_id);

    let range = query.date_range(Utc::now().date_naive());
    let recent_limit = RECENT_ACTIVITIES as u64;

    let (loaded, grades) = join(
        try_join4(
            storage.get_school_by_id(user.school_id),
            storage.get_school_stats(user.school_id),
            storage.attendance_facts(scope, FactFilter::in_range(range)),
            try_join(
                storage.recent_students(user.school_id, recent_limit),
                storage.recent_teachers(user.school_id, recent_limit),
            ),
        ),
        storage.grade_facts(scope, FactFilter::in_range(range)),
    )
    .await;
    let (school, overview, attendance, (students, teachers)) = loaded?;

    let Some(school) = school else {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "School not found"));
    };
    let grades = grades_or_default(grades, "school analytics");
    let since = range.start.and_time(NaiveTime::MIN).and_utc();

    Ok(HttpResponse::Ok().json(ApiResponse::data(SchoolAnalytics {
        school,
        overview,
        period: query.period_days(),
        date_range: range,
        attendance_overview: attendance_totals(&attendance),
        performance_overview: performance_overview(&grades),
        recent_activities: recent_activities(&students, &teachers, since, RECENT_ACTIVITIES),
    })))
}
