use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::join;

use super::aggregate::{attendance_rate_by_student, average_grade_by_student};
use super::{AnalyticsService, grades_or_default};
use crate::models::analytics::{
    facts::FactFilter,
    requests::AnalyticsQuery,
    responses::{StudentAnalytics, StudentAnalyticsItem},
};
use crate::models::students::requests::StudentListQuery;
use crate::models::{ApiResponse, PaginatedResponse, PaginationInfo};
use crate::services::current_scope;

pub async fn student_analytics(
    service: &AnalyticsService,
    request: &HttpRequest,
    query: AnalyticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let range = query.date_range(Utc::now().date_naive());

    // 指定学生时只返回该学生（仍受访问范围约束）
    let page = match query.student_id {
        Some(student_id) => {
            let items: Vec<_> = storage.get_student(scope, student_id).await?.into_iter().collect();
            let (_, limit) = query.pagination.normalized();
            PaginatedResponse {
                pagination: PaginationInfo::new(1, limit, items.len() as u64),
                items,
            }
        }
        None => {
            storage
                .list_students(
                    scope,
                    StudentListQuery {
                        pagination: query.pagination.clone(),
                        class_id: query.class_id,
                        search: None,
                        is_active: Some(true),
                    },
                )
                .await?
        }
    };

    let filter = FactFilter {
        range: Some(range),
        class_id: query.class_id,
        student_id: query.student_id,
        ..Default::default()
    };
    let (attendance, grades) = join(
        storage.attendance_facts(scope, filter.clone()),
        storage.grade_facts(scope, filter),
    )
    .await;
    let attendance_rates = attendance_rate_by_student(&attendance?);
    let grade_averages = average_grade_by_student(&grades_or_default(grades, "student analytics"));

    let students: Vec<StudentAnalyticsItem> = page
        .items
        .into_iter()
        .map(|student| StudentAnalyticsItem {
            attendance_percentage: attendance_rates
                .get(&student.student.id)
                .copied()
                .unwrap_or(0.0),
            average_grade_percentage: grade_averages
                .get(&student.student.id)
                .copied()
                .unwrap_or(0.0),
            student,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        StudentAnalytics {
            total_students: page.pagination.total,
            period: query.period_days(),
            date_range: range,
            students,
        },
        page.pagination,
    )))
}
