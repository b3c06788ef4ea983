pub mod create;
pub mod get;
pub mod list;
pub mod manage;
pub mod stats;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::PaginationQuery;
use crate::models::homework::requests::{
    CreateHomeworkRequest, HomeworkListQuery, HomeworkStatsQuery, SubmitHomeworkRequest,
    UpdateHomeworkRequest,
};

super::lazy_storage_service!(HomeworkService);

impl HomeworkService {
    pub async fn create_homework(
        &self,
        request: &HttpRequest,
        homework: CreateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_homework(self, request, homework).await
    }

    pub async fn list_homework(
        &self,
        request: &HttpRequest,
        query: HomeworkListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_homework(self, request, query).await
    }

    pub async fn list_class_homework(
        &self,
        request: &HttpRequest,
        class_id: i64,
        pagination: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_class_homework(self, request, class_id, pagination).await
    }

    pub async fn list_teacher_homework(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        pagination: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_homework(self, request, teacher_id, pagination).await
    }

    pub async fn get_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_homework(self, request, homework_id).await
    }

    pub async fn update_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        update: UpdateHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_homework(self, request, homework_id, update).await
    }

    pub async fn delete_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_homework(self, request, homework_id).await
    }

    pub async fn publish_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::publish_homework(self, request, homework_id).await
    }

    pub async fn get_stats(
        &self,
        request: &HttpRequest,
        query: HomeworkStatsQuery,
    ) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request, query).await
    }

    // 学生提交作业
    pub async fn submit_homework(
        &self,
        request: &HttpRequest,
        homework_id: i64,
        submission: SubmitHomeworkRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_homework(self, request, homework_id, submission).await
    }
}
