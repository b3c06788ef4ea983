pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod classes;
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

pub use analytics::AnalyticsService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use complaints::ComplaintService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use homework::HomeworkService;
pub use notifications::NotificationService;
pub use qa::QaService;
pub use schools::SchoolService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use timetable::TimetableService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::{HttpRequest, web};

use crate::errors::{Result, SchoolError};
use crate::middlewares::RequireJWT;
use crate::models::{AccessScope, users::entities::User};
use crate::storage::Storage;

/// 从 app data 中取出存储实例
pub(crate) fn app_storage(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| SchoolError::database_connection("Storage not found in app data"))
}

/// 当前认证用户，RequireJWT 之后一定存在
pub(crate) fn current_user(request: &HttpRequest) -> Result<User> {
    RequireJWT::extract_user_claims(request)
        .ok_or_else(|| SchoolError::authentication("Authentication required"))
}

/// 当前用户及其访问范围
pub(crate) fn current_scope(request: &HttpRequest) -> Result<(User, AccessScope)> {
    let user = current_user(request)?;
    let scope = AccessScope::for_user(&user);
    Ok((user, scope))
}

/// 为服务生成 `new_lazy` 与 `get_storage`
macro_rules! lazy_storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> $crate::errors::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => $crate::services::app_storage(request),
                }
            }
        }
    };
}

pub(crate) use lazy_storage_service;
