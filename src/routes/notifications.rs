use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::{
    CreateNotificationRequest, NotificationListQuery, NotificationStatsQuery,
};
use crate::models::users::entities::UserRole;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

// 可以接收并阅读通知的角色
const READER_ROLES: &[&UserRole] = &[
    &UserRole::Admin,
    &UserRole::ClassTeacher,
    &UserRole::Parent,
    &UserRole::Student,
];

pub async fn create_notification(
    req: HttpRequest,
    notification_data: web::Json<CreateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_notification(&req, notification_data.into_inner())
        .await
}

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

pub async fn get_notification(
    req: HttpRequest,
    notification_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .get_notification(&req, notification_id.0)
        .await
}

pub async fn mark_read(req: HttpRequest, notification_id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(&req, notification_id.0).await
}

pub async fn delete_notification(
    req: HttpRequest,
    notification_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .delete_notification(&req, notification_id.0)
        .await
}

pub async fn get_stats(
    req: HttpRequest,
    query: web::Query<NotificationStatsQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_stats(&req, query.into_inner()).await
}

pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(create_notification)
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::class_manager_roles(),
                            )),
                    )
                    .route(
                        web::get()
                            .to(list_notifications)
                            .wrap(middlewares::RequireRole::new_any(READER_ROLES)),
                    ),
            )
            .service(
                web::resource("/stats").route(
                    web::get().to(get_stats).wrap(middlewares::RequireRole::new_any(
                        UserRole::class_manager_roles(),
                    )),
                ),
            )
            .service(
                web::resource("/{id}/read").route(
                    web::put()
                        .to(mark_read)
                        .wrap(middlewares::RequireRole::new_any(READER_ROLES)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_notification)
                            .wrap(middlewares::RequireRole::new_any(READER_ROLES)),
                    )
                    .route(
                        web::delete()
                            .to(delete_notification)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
