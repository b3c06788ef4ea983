use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schools::requests::UpdateSchoolRequest;
use crate::models::users::entities::UserRole;
use crate::services::SchoolService;

static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .update_profile(&req, update_data.into_inner())
        .await
}

pub async fn get_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_stats(&req).await
}

pub fn configure_school_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/school")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/profile")
                    .route(web::get().to(get_profile))
                    .route(
                        web::put()
                            .to(update_profile)
                            .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                    ),
            )
            .service(
                web::resource("/stats").route(
                    web::get()
                        .to(get_stats)
                        .wrap(middlewares::RequireRole::new(&UserRole::Admin)),
                ),
            ),
    );
}
