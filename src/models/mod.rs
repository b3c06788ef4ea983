pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod complaints;
pub mod dashboard;
pub mod grades;
pub mod homework;
pub mod notifications;
pub mod qa;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod timetable;
pub mod users;

pub use common::*;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 健康检查
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api.ts")]
pub struct HealthStatus {
    pub status: String,
    pub environment: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_secs: i64,
}
