use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::analytics::requests::{clamp_period, days_before};
use crate::models::notifications::{
    requests::NotificationStatsQuery, responses::NotificationStats,
};
use crate::services::current_user;

pub async fn get_stats(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationStatsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let period = clamp_period(query.period);
    let now = Utc::now();
    let since = now.checked_sub_signed(days_before(period)).unwrap_or(now);
    let notifications = storage.notifications_since(user.school_id, since).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(
        NotificationStats::from_notifications(period, &notifications),
    )))
}
