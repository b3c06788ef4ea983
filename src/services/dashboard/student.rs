use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::{join, try_join4};

use super::{DashboardService, RECENT_ITEMS, first_page};
use crate::models::analytics::{
    facts::FactFilter,
    requests::{DEFAULT_PERIOD_DAYS, DateRange},
};
use crate::models::dashboard::responses::StudentDashboard;
use crate::models::grades::requests::GradeListQuery;
use crate::models::homework::{requests::HomeworkListQuery, responses::StudentHomeworkItem};
use crate::models::timetable::{entities::weekday_number, requests::TimetableListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::analytics::grades_or_default;
use crate::services::current_scope;
use crate::utils::metrics::attendance_summary;

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;
    let today = Utc::now().date_naive();

    let Some(student) = storage.get_student_by_user_id(user.id).await? else {
        return Ok(ApiResponse::respond(
            ErrorCode::NotFound,
            "Student profile not found",
        ));
    };

    let range = DateRange::resolve(None, None, DEFAULT_PERIOD_DAYS, today);
    let homework_query = HomeworkListQuery {
        is_published: Some(true),
        ..HomeworkListQuery::new(first_page(RECENT_ITEMS))
    };
    let schedule_query = TimetableListQuery {
        class_id: Some(student.student.class_id),
        day_of_week: Some(weekday_number(today)),
        ..Default::default()
    };
    let grade_query = GradeListQuery {
        pagination: first_page(RECENT_ITEMS),
        student_id: Some(student.student.id),
        subject_id: None,
        exam_type: None,
    };

    let (loaded, grades) = join(
        try_join4(
            storage.attendance_facts(scope, FactFilter::in_range(range)),
            storage.list_homework(scope, homework_query),
            storage.submissions_of_student(student.student.id),
            storage.list_timetable(scope, schedule_query),
        ),
        storage.list_grades(scope, grade_query, None),
    )
    .await;
    let (attendance, homework, submissions, mut today_schedule) = loaded?;
    let recent_grades = grades_or_default(grades.map(|page| page.items), "student dashboard");
    today_schedule.sort_by_key(|e| e.entry.period_number);

    let mut by_homework: HashMap<i64, _> = submissions
        .into_iter()
        .map(|s| (s.homework_id, s))
        .collect();
    let homework = homework
        .items
        .into_iter()
        .map(|view| StudentHomeworkItem {
            submission: by_homework.remove(&view.homework.id),
            homework: view,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(StudentDashboard {
        attendance: attendance_summary(attendance.iter().map(|f| f.status)),
        student,
        homework,
        recent_grades,
        today_schedule,
    })))
}
