use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::{try_join, try_join4};

use super::{
    DashboardService, RECENT_ITEMS, RECENT_PEOPLE, first_page, rounded_attendance, single_day,
    teacher_loads,
};
use crate::models::analytics::facts::FactFilter;
use crate::models::dashboard::responses::AdminDashboard;
use crate::models::homework::requests::HomeworkListQuery;
use crate::models::timetable::requests::TimetableListQuery;
use crate::models::{AccessScope, ApiResponse};
use crate::services::current_user;

pub async fn admin_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let scope = AccessScope::school(user.school_id);
    let today = Utc::now().date_naive();

    let (counts, today_facts, recent_students, recent_teachers) = try_join4(
        storage.get_school_stats(user.school_id),
        storage.attendance_facts(scope, FactFilter::in_range(single_day(today))),
        storage.recent_students(user.school_id, RECENT_PEOPLE),
        storage.recent_teachers(user.school_id, RECENT_PEOPLE),
    )
    .await?;
    let ((recent_attendance, recent_homework), (classes, timetable)) = try_join(
        try_join(
            storage.recent_attendance(scope, RECENT_ITEMS),
            storage.list_homework(scope, HomeworkListQuery::new(first_page(RECENT_ITEMS))),
        ),
        try_join(
            storage.class_items(scope),
            storage.list_timetable(scope, TimetableListQuery::default()),
        ),
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(AdminDashboard {
        counts,
        today_attendance_percentage: rounded_attendance(&today_facts),
        recent_students,
        recent_teachers,
        recent_attendance,
        recent_homework: recent_homework.items,
        classes,
        teacher_workload: teacher_loads(&timetable),
    })))
}
