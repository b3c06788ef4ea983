pub mod delete;
pub mod parents;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{CreateParentRequest, UpdateUserRequest};

super::lazy_storage_service!(UserService);

impl UserService {
    // 管理员创建家长账号
    pub async fn create_parent(
        &self,
        request: &HttpRequest,
        parent: CreateParentRequest,
    ) -> ActixResult<HttpResponse> {
        parents::create_parent(self, request, parent).await
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, update).await
    }

    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}
