use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn admin(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin(&req).await
}

pub async fn teacher(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher(&req).await
}

pub async fn parent(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.parent(&req).await
}

pub async fn student(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student(&req).await
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/admin").route(
                    web::get()
                        .to(admin)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            )
            .service(
                web::resource("/teacher").route(
                    web::get().to(teacher).wrap(middlewares::RequireRole::new_any(
                        UserRole::teaching_staff_roles(),
                    )),
                ),
            )
            .service(
                web::resource("/parent").route(
                    web::get()
                        .to(parent)
                        .wrap(middlewares::RequireRole::new(&UserRole::Parent)),
                ),
            )
            .service(
                web::resource("/student").route(
                    web::get()
                        .to(student)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );
}
