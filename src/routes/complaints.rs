use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::complaints::requests::{
    ComplaintListQuery, CreateComplaintRequest, ResolveComplaintRequest, UpdateComplaintRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ComplaintService;
use crate::utils::SafeIDI64;

static COMPLAINT_SERVICE: Lazy<ComplaintService> = Lazy::new(ComplaintService::new_lazy);

const FILER_ROLES: &[&UserRole] = &[&UserRole::Parent, &UserRole::Student, &UserRole::Admin];
const VIEWER_ROLES: &[&UserRole] = &[&UserRole::Admin, &UserRole::ClassTeacher, &UserRole::Parent];

pub async fn create_complaint(
    req: HttpRequest,
    complaint_data: web::Json<CreateComplaintRequest>,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE
        .create_complaint(&req, complaint_data.into_inner())
        .await
}

pub async fn list_complaints(
    req: HttpRequest,
    query: web::Query<ComplaintListQuery>,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE
        .list_complaints(&req, query.into_inner())
        .await
}

pub async fn get_complaint(
    req: HttpRequest,
    complaint_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE.get_complaint(&req, complaint_id.0).await
}

pub async fn update_complaint(
    req: HttpRequest,
    complaint_id: SafeIDI64,
    update_data: web::Json<UpdateComplaintRequest>,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE
        .update_complaint(&req, complaint_id.0, update_data.into_inner())
        .await
}

pub async fn resolve_complaint(
    req: HttpRequest,
    complaint_id: SafeIDI64,
    resolve_data: web::Json<ResolveComplaintRequest>,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE
        .resolve_complaint(&req, complaint_id.0, resolve_data.into_inner())
        .await
}

pub async fn delete_complaint(
    req: HttpRequest,
    complaint_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    COMPLAINT_SERVICE
        .delete_complaint(&req, complaint_id.0)
        .await
}

pub fn configure_complaint_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/complaints")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(create_complaint)
                            .wrap(middlewares::RequireRole::new_any(FILER_ROLES)),
                    )
                    .route(
                        web::get()
                            .to(list_complaints)
                            .wrap(middlewares::RequireRole::new_any(VIEWER_ROLES)),
                    ),
            )
            .service(
                web::resource("/{id}/resolve").route(
                    web::put()
                        .to(resolve_complaint)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::class_manager_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_complaint)
                            .wrap(middlewares::RequireRole::new_any(VIEWER_ROLES)),
                    )
                    .route(
                        web::put()
                            .to(update_complaint)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::class_manager_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_complaint)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
