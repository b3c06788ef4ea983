pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::grades::requests::{CreateGradeRequest, GradeListQuery};

super::lazy_storage_service!(GradeService);

impl GradeService {
    // 录入考试成绩
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade).await
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }
}
