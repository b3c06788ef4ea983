use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::try_join5;

use super::AnalyticsService;
use super::aggregate::{homework_completion_rate, teacher_workload};
use crate::models::analytics::{
    facts::FactFilter,
    requests::AnalyticsQuery,
    responses::{TeacherAnalytics, TeacherAnalyticsItem},
};
use crate::models::timetable::requests::TimetableListQuery;
use crate::models::{AccessScope, ApiResponse};
use crate::services::current_user;

pub async fn teacher_analytics(
    service: &AnalyticsService,
    request: &HttpRequest,
    query: AnalyticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;
    let scope = AccessScope::school(user.school_id);

    let range = query.date_range(Utc::now().date_naive());
    let (teachers, classes, timetable, homework, attendance) = try_join5(
        storage.active_teachers(user.school_id),
        storage.class_items(scope),
        storage.list_timetable(scope, TimetableListQuery::default()),
        storage.homework_facts(scope, None, None, Some(range)),
        storage.attendance_facts(scope, FactFilter::in_range(range)),
    )
    .await?;

    let class_sizes: HashMap<i64, i64> = classes
        .iter()
        .map(|c| (c.class.id, c.student_count))
        .collect();

    // 所有 ID 均为教师的用户 ID
    let items: Vec<TeacherAnalyticsItem> = teachers
        .into_iter()
        .map(|teacher| {
            let user_id = teacher.teacher.user_id;
            let entries: Vec<_> = timetable
                .iter()
                .filter(|e| e.entry.teacher_id == user_id)
                .collect();
            let created: Vec<_> = homework.iter().filter(|h| h.teacher_id == user_id).collect();
            TeacherAnalyticsItem {
                classes_as_class_teacher: classes
                    .iter()
                    .filter(|c| c.class.class_teacher_id == Some(user_id))
                    .count() as i64,
                timetable_periods: entries.len() as i64,
                homework_created: created.len() as i64,
                attendance_marked: attendance.iter().filter(|a| a.marked_by == user_id).count()
                    as i64,
                workload: teacher_workload(&entries),
                homework_completion_rate: homework_completion_rate(&created, &class_sizes),
                teacher,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(TeacherAnalytics {
        total_teachers: items.len() as i64,
        period: query.period_days(),
        date_range: range,
        teachers: items,
    })))
}
