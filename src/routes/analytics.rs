use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::analytics::requests::AnalyticsQuery;
use crate::models::users::entities::UserRole;
use crate::services::AnalyticsService;

static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

pub async fn attendance(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.attendance(&req, query.into_inner()).await
}

pub async fn performance(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.performance(&req, query.into_inner()).await
}

pub async fn classes(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.classes(&req, query.into_inner()).await
}

pub async fn teachers(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.teachers(&req, query.into_inner()).await
}

pub async fn students(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.students(&req, query.into_inner()).await
}

pub async fn school(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE.school(&req, query.into_inner()).await
}

pub fn configure_analytics_routes(cfg: &mut web::ServiceConfig) {
    let manager_only = || middlewares::RequireRole::new_any(UserRole::class_manager_roles());
    let admin_only = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/analytics")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/attendance").route(web::get().to(attendance).wrap(manager_only())),
            )
            .service(
                web::resource("/performance")
                    .route(web::get().to(performance).wrap(manager_only())),
            )
            .service(web::resource("/class").route(web::get().to(classes).wrap(manager_only())))
            .service(web::resource("/teacher").route(web::get().to(teachers).wrap(admin_only())))
            .service(web::resource("/school").route(web::get().to(school).wrap(admin_only())))
            .service(
                // 家长只能看到自己的孩子
                web::resource("/student").route(web::get().to(students).wrap(
                    middlewares::RequireRole::new_any(&[
                        &UserRole::Admin,
                        &UserRole::ClassTeacher,
                        &UserRole::Parent,
                    ]),
                )),
            ),
    );
}
