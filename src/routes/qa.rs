use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::qa::requests::{
    CreateQaRequest, QaListQuery, ReplyQaRequest, UpdateQaStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QaService;
use crate::utils::SafeIDI64;

static QA_SERVICE: Lazy<QaService> = Lazy::new(QaService::new_lazy);

const ASKER_ROLES: &[&UserRole] = &[&UserRole::Parent, &UserRole::ClassTeacher];
const VIEWER_ROLES: &[&UserRole] = &[&UserRole::Parent, &UserRole::ClassTeacher, &UserRole::Admin];

pub async fn create_message(
    req: HttpRequest,
    message_data: web::Json<CreateQaRequest>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE
        .create_message(&req, message_data.into_inner())
        .await
}

pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<QaListQuery>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE.list_messages(&req, query.into_inner()).await
}

pub async fn get_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QA_SERVICE.get_message(&req, message_id.0).await
}

pub async fn reply_message(
    req: HttpRequest,
    message_id: SafeIDI64,
    reply_data: web::Json<ReplyQaRequest>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE
        .reply_message(&req, message_id.0, reply_data.into_inner())
        .await
}

pub async fn update_status(
    req: HttpRequest,
    message_id: SafeIDI64,
    status_data: web::Json<UpdateQaStatusRequest>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE
        .update_status(&req, message_id.0, status_data.into_inner())
        .await
}

pub async fn delete_message(req: HttpRequest, message_id: SafeIDI64) -> ActixResult<HttpResponse> {
    QA_SERVICE.delete_message(&req, message_id.0).await
}

pub fn configure_qa_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/qa")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(create_message)
                            .wrap(middlewares::RequireRole::new_any(ASKER_ROLES)),
                    )
                    .route(
                        web::get()
                            .to(list_messages)
                            .wrap(middlewares::RequireRole::new_any(VIEWER_ROLES)),
                    ),
            )
            .service(
                web::resource("/{id}/reply").route(
                    web::put()
                        .to(reply_message)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::class_manager_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}/status").route(
                    web::put()
                        .to(update_status)
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::class_manager_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_message)
                            .wrap(middlewares::RequireRole::new_any(VIEWER_ROLES)),
                    )
                    .route(
                        web::delete()
                            .to(delete_message)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
