pub mod profile;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::schools::requests::UpdateSchoolRequest;

super::lazy_storage_service!(SchoolService);

impl SchoolService {
    // 获取当前用户所属学校
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        update: UpdateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, request, update).await
    }

    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request).await
    }
}
