use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::timetable::requests::{
    AcademicYearQuery, CreateTimetableRequest, TimetableListQuery, UpdateTimetableRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TimetableService;
use crate::utils::SafeIDI64;

static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);

pub async fn list_timetable(
    req: HttpRequest,
    query: web::Query<TimetableListQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .list_timetable(&req, query.into_inner())
        .await
}

pub async fn get_class_timetable(
    req: HttpRequest,
    class_id: SafeIDI64,
    query: web::Query<AcademicYearQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .get_class_timetable(&req, class_id.0, query.into_inner())
        .await
}

pub async fn get_teacher_timetable(
    req: HttpRequest,
    teacher_id: SafeIDI64,
    query: web::Query<AcademicYearQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .get_teacher_timetable(&req, teacher_id.0, query.into_inner())
        .await
}

pub async fn create_entry(
    req: HttpRequest,
    entry_data: web::Json<CreateTimetableRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .create_entry(&req, entry_data.into_inner())
        .await
}

pub async fn update_entry(
    req: HttpRequest,
    entry_id: SafeIDI64,
    update_data: web::Json<UpdateTimetableRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_entry(&req, entry_id.0, update_data.into_inner())
        .await
}

pub async fn delete_entry(req: HttpRequest, entry_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_entry(&req, entry_id.0).await
}

pub async fn get_stats(
    req: HttpRequest,
    query: web::Query<AcademicYearQuery>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.get_stats(&req, query.into_inner()).await
}

pub fn configure_timetable_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timetable")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_timetable)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_entry)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/stats").route(
                    web::get()
                        .to(get_stats)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                // 家长与学生也可以查看班级课表，范围由服务层限定
                web::resource("/class/{id}").route(
                    web::get()
                        .to(get_class_timetable)
                        .wrap(middlewares::RequireRole::new_any(UserRole::all_roles())),
                ),
            )
            .service(
                web::resource("/teacher/{id}").route(
                    web::get()
                        .to(get_teacher_timetable)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::put().to(update_entry))
                    .route(web::delete().to(delete_entry)),
            ),
    );
}
