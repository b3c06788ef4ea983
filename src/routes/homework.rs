use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::homework::requests::{
    CreateHomeworkRequest, HomeworkListQuery, HomeworkStatsQuery, SubmitHomeworkRequest,
    UpdateHomeworkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::HomeworkService;
use crate::utils::SafeIDI64;

static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);

pub async fn create_homework(
    req: HttpRequest,
    homework_data: web::Json<CreateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .create_homework(&req, homework_data.into_inner())
        .await
}

pub async fn list_homework(
    req: HttpRequest,
    query: web::Query<HomeworkListQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.list_homework(&req, query.into_inner()).await
}

pub async fn list_class_homework(
    req: HttpRequest,
    class_id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .list_class_homework(&req, class_id.0, query.into_inner())
        .await
}

pub async fn list_teacher_homework(
    req: HttpRequest,
    teacher_id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .list_teacher_homework(&req, teacher_id.0, query.into_inner())
        .await
}

pub async fn get_homework(req: HttpRequest, homework_id: SafeIDI64) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.get_homework(&req, homework_id.0).await
}

pub async fn update_homework(
    req: HttpRequest,
    homework_id: SafeIDI64,
    update_data: web::Json<UpdateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .update_homework(&req, homework_id.0, update_data.into_inner())
        .await
}

pub async fn delete_homework(
    req: HttpRequest,
    homework_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.delete_homework(&req, homework_id.0).await
}

pub async fn publish_homework(
    req: HttpRequest,
    homework_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.publish_homework(&req, homework_id.0).await
}

pub async fn get_stats(
    req: HttpRequest,
    query: web::Query<HomeworkStatsQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE.get_stats(&req, query.into_inner()).await
}

pub async fn submit_homework(
    req: HttpRequest,
    homework_id: SafeIDI64,
    submission: web::Json<SubmitHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .submit_homework(&req, homework_id.0, submission.into_inner())
        .await
}

pub fn configure_homework_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/homework")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::post().to(create_homework))
                    .route(web::get().to(list_homework)),
            )
            .service(
                web::resource("/stats").route(
                    web::get().to(get_stats).wrap(middlewares::RequireRole::new_any(
                        UserRole::class_manager_roles(),
                    )),
                ),
            )
            .service(
                web::resource("/teacher/{id}").route(
                    web::get()
                        .to(list_teacher_homework)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/class/{id}").route(
                    web::get()
                        .to(list_class_homework)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{id}/publish").route(
                    web::patch()
                        .to(publish_homework)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                // 仅学生本人可以提交作业
                web::resource("/{id}/submit").route(
                    web::post()
                        .to(submit_homework)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(get_homework))
                    .route(web::put().to(update_homework))
                    .route(web::delete().to(delete_homework)),
            ),
    );
}
