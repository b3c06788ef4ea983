pub mod delete;
pub mod list;
pub mod mark;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceStatsQuery, MarkAttendanceRequest, UpdateAttendanceRequest,
};

super::lazy_storage_service!(AttendanceService);

impl AttendanceService {
    // 整班点名
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        mark_request: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, mark_request).await
    }

    pub async fn list_class_attendance(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_class_attendance(self, request, class_id, query).await
    }

    pub async fn list_student_attendance(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_student_attendance(self, request, student_id, query).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        record_id: i64,
        update: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, request, record_id, update).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        record_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, request, record_id).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: AttendanceStatsQuery,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }
}
