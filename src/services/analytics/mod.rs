pub mod aggregate;
pub mod attendance;
pub mod classes;
pub mod performance;
pub mod school;
pub mod students;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use crate::errors::Result;
use crate::models::analytics::requests::AnalyticsQuery;

super::lazy_storage_service!(AnalyticsService);

impl AnalyticsService {
    pub async fn attendance(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        attendance::attendance_analytics(self, request, query).await
    }

    // 成绩查询失败时返回空统计
    pub async fn performance(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        performance::performance_analytics(self, request, query).await
    }

    pub async fn classes(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        classes::class_analytics(self, request, query).await
    }

    pub async fn teachers(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        teachers::teacher_analytics(self, request, query).await
    }

    pub async fn students(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        students::student_analytics(self, request, query).await
    }

    pub async fn school(
        &self,
        request: &HttpRequest,
        query: AnalyticsQuery,
    ) -> ActixResult<HttpResponse> {
        school::school_analytics(self, request, query).await
    }
}

/// 成绩类查询失败只记录告警，用空结果代替
pub(crate) fn grades_or_default<T: Default>(result: Result<T>, context: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("Grade query failed ({}), using empty result: {}", context, e);
        T::default()
    })
}
