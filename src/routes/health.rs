use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::Utc;

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime, HealthStatus};

pub async fn health(start_time: Option<web::Data<AppStartTime>>) -> ActixResult<HttpResponse> {
    let now = Utc::now();
    let uptime_secs = start_time
        .map(|t| now.signed_duration_since(t.start_datetime).num_seconds())
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthStatus {
            status: "ok".to_string(),
            environment: AppConfig::get().app.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now,
            uptime_secs,
        },
        "School Management API is running",
    )))
}

// 健康检查无需认证
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
