use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::join;
use tracing::warn;

use super::aggregate::{
    TOP_STUDENTS, class_performance, performance_overview, student_performance,
    subject_performance,
};
use super::{AnalyticsService, grades_or_default};
use crate::models::analytics::{
    facts::FactFilter, requests::AnalyticsQuery, responses::PerformanceAnalytics,
};
use crate::models::grades::requests::GradeListQuery;
use crate::models::{ApiResponse, PaginationInfo};
use crate::services::current_scope;

pub async fn performance_analytics(
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
        subject_id: query.subject_id,
        exam_type: query.exam_type.clone(),
    };
    let list_query = GradeListQuery {
        pagination: query.pagination.clone(),
        student_id: query.student_id,
        subject_id: query.subject_id,
        exam_type: query.exam_type.clone(),
    };

    let (facts, page) = join(
        storage.grade_facts(scope, filter),
        storage.list_grades(scope, list_query, Some(range)),
    )
    .await;
    let facts = grades_or_default(facts, "performance facts");
    let (records, pagination) = match page {
        Ok(page) => (page.items, page.pagination),
        Err(e) => {
            warn!("Grade records query failed, using empty page: {}", e);
            let (page, limit) = query.pagination.normalized();
            (Vec::new(), PaginationInfo::new(page, limit, 0))
        }
    };

    let analytics = PerformanceAnalytics {
        overview: performance_overview(&facts),
        period: query.period_days(),
        date_range: range,
        subject_wise_stats: subject_performance(&facts),
        class_wise_stats: class_performance(&facts),
        student_wise_stats: student_performance(&facts, TOP_STUDENTS),
        records,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(analytics, pagination)))
}
