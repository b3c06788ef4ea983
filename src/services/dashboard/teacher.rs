use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::{try_join, try_join3};

use super::{DashboardService, RECENT_ITEMS, first_page, present_by_class, single_day};
use crate::models::{AccessScope, ApiResponse};
use crate::models::analytics::facts::FactFilter;
use crate::models::dashboard::responses::{ClassTodayStat, TeacherDashboard};
use crate::models::qa::{entities::QaStatus, requests::QaListQuery};
use crate::models::timetable::{entities::weekday_number, requests::TimetableListQuery};
use crate::services::current_scope;

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;
    let now = Utc::now();
    let today = now.date_naive();

    // 当天自己的课表
    let schedule_query = TimetableListQuery {
        teacher_id: Some(user.id),
        day_of_week: Some(weekday_number(today)),
        ..Default::default()
    };
    let pending_questions = QaListQuery {
        pagination: first_page(RECENT_ITEMS),
        status: Some(QaStatus::Pending),
        student_id: None,
    };

    let (classes, mut today_schedule, today_facts) = try_join3(
        storage.class_items(scope),
        storage.list_timetable(AccessScope::school(user.school_id), schedule_query),
        storage.attendance_facts(scope, FactFilter::in_range(single_day(today))),
    )
    .await?;
    let ((recent_attendance, pending_homework), questions) = try_join(
        try_join(
            storage.recent_attendance(scope, RECENT_ITEMS),
            storage.pending_homework(scope, Some(user.id), now, RECENT_ITEMS),
        ),
        storage.list_qa(scope, pending_questions),
    )
    .await?;
    today_schedule.sort_by_key(|e| e.entry.period_number);

    let present = present_by_class(&today_facts);
    let class_stats = classes
        .iter()
        .map(|c| ClassTodayStat {
            class_id: c.class.id,
            class_name: c.class.name.clone(),
            section: c.class.section.clone(),
            student_count: c.student_count,
            present_today: present.get(&c.class.id).copied().unwrap_or(0),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(TeacherDashboard {
        classes,
        today_schedule,
        recent_attendance,
        pending_homework,
        pending_questions: questions.items,
        class_stats,
    })))
}
