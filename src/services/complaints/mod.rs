pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::complaints::requests::{
    ComplaintListQuery, CreateComplaintRequest, ResolveComplaintRequest, UpdateComplaintRequest,
};

super::lazy_storage_service!(ComplaintService);

impl ComplaintService {
    pub async fn create_complaint(
        &self,
        request: &HttpRequest,
        complaint: CreateComplaintRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_complaint(self, request, complaint).await
    }

    pub async fn list_complaints(
        &self,
        request: &HttpRequest,
        query: ComplaintListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_complaints(self, request, query).await
    }

    pub async fn get_complaint(
        &self,
        request: &HttpRequest,
        complaint_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_complaint(self, request, complaint_id).await
    }

    pub async fn update_complaint(
        &self,
        request: &HttpRequest,
        complaint_id: i64,
        update: UpdateComplaintRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_complaint(self, request, complaint_id, update).await
    }

    // 标记为已解决并记录处理人
    pub async fn resolve_complaint(
        &self,
        request: &HttpRequest,
        complaint_id: i64,
        resolve: ResolveComplaintRequest,
    ) -> ActixResult<HttpResponse> {
        update::resolve_complaint(self, request, complaint_id, resolve).await
    }

    pub async fn delete_complaint(
        &self,
        request: &HttpRequest,
        complaint_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_complaint(self, request, complaint_id).await
    }
}
