use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::try_join;

use super::AnalyticsService;
use super::aggregate::{
    DAILY_TREND_DAYS, TOP_STUDENTS, attendance_totals, class_attendance, daily_trends,
    status_breakdown, student_attendance,
};
use crate::models::ApiResponse;
use crate::models::analytics::{
    facts::FactFilter,
    requests::AnalyticsQuery,
    responses::{AttendanceAnalytics, AttendanceOverview},
};
use crate::services::current_scope;

pub async fn attendance_analytics(
    service: &AnalyticsService,
    request: &HttpRequest,
    query: AnalyticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let range = query.date_range(Utc::now().date_naive());
    let filter = FactFilter {
        range: Some(range),
        class_id: query.class_id,
        student_id: query.student_id,
        ..Default::default()
    };

    let (facts, page) = try_join(
        storage.attendance_facts(scope, filter.clone()),
        storage.attendance_page(scope, filter, query.pagination.clone()),
    )
    .await?;

    let totals = attendance_totals(&facts);
    let analytics = AttendanceAnalytics {
        overview: AttendanceOverview {
            total_records: totals.total_records,
            period: query.period_days(),
            date_range: range,
            overall_percentage: totals.attendance_percentage,
        },
        by_status: status_breakdown(&facts),
        daily_trends: daily_trends(&facts, DAILY_TREND_DAYS),
        class_wise_stats: class_attendance(&facts),
        student_wise_stats: student_attendance(&facts, TOP_STUDENTS),
        records: page.items,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(analytics, page.pagination)))
}
