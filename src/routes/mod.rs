pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod complaints;
pub mod dashboard;
pub mod grades;
pub mod health;
pub mod homework;
pub mod notifications;
pub mod qa;
pub mod school;
pub mod subjects;
pub mod teachers;
pub mod timetable;
pub mod users;

#[cfg(test)]
mod tests;

pub use analytics::configure_analytics_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use complaints::configure_complaint_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grade_routes;
pub use health::configure_health_routes;
pub use homework::configure_homework_routes;
pub use notifications::configure_notification_routes;
pub use qa::configure_qa_routes;
pub use school::configure_school_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;
pub use timetable::configure_timetable_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_school_routes)
        .configure(configure_classes_routes)
        .configure(configure_user_routes)
        .configure(configure_teacher_routes)
        .configure(configure_subject_routes)
        .configure(configure_timetable_routes)
        .configure(configure_attendance_routes)
        .configure(configure_homework_routes)
        .configure(configure_grade_routes)
        .configure(configure_notification_routes)
        .configure(configure_qa_routes)
        .configure(configure_complaint_routes)
        .configure(configure_analytics_routes)
        .configure(configure_dashboard_routes);
}
