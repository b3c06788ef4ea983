pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reply;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::qa::requests::{
    CreateQaRequest, QaListQuery, ReplyQaRequest, UpdateQaStatusRequest,
};

super::lazy_storage_service!(QaService);

impl QaService {
    // 家长向班主任提问，或班主任联系家长
    pub async fn create_message(
        &self,
        request: &HttpRequest,
        message: CreateQaRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_message(self, request, message).await
    }

    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        query: QaListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, request, query).await
    }

    pub async fn get_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_message(self, request, message_id).await
    }

    pub async fn reply_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
        reply: ReplyQaRequest,
    ) -> ActixResult<HttpResponse> {
        reply::reply_message(self, request, message_id, reply).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        message_id: i64,
        status: UpdateQaStatusRequest,
    ) -> ActixResult<HttpResponse> {
        reply::update_status(self, request, message_id, status).await
    }

    pub async fn delete_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_message(self, request, message_id).await
    }
}
