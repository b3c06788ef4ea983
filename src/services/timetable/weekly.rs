use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::TimetableService;
use crate::models::timetable::{
    entities::{WEEK_ORDER, current_academic_year, day_name},
    requests::{AcademicYearQuery, TimetableListQuery},
    responses::{DaySchedule, TimetableEntryView, WeeklyTimetable},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_scope;

pub async fn get_class_timetable(
    service: &TimetableService,
    request: &HttpRequest,
    class_id: i64,
    query: AcademicYearQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    if storage.get_class_item(scope, class_id).await?.is_none() {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Class not found"));
    }

    let academic_year = resolve_year(query);
    let entries = storage
        .list_timetable(
            scope,
            TimetableListQuery {
                class_id: Some(class_id),
                academic_year: Some(academic_year.clone()),
                ..Default::default()
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(group_by_weekday(
        academic_year,
        entries,
    ))))
}

pub async fn get_teacher_timetable(
    service: &TimetableService,
    request: &HttpRequest,
    teacher_id: i64,
    query: AcademicYearQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;

    if !storage.is_active_teacher_user(user.school_id, teacher_id).await? {
        return Ok(ApiResponse::respond(ErrorCode::NotFound, "Teacher not found"));
    }

    let academic_year = resolve_year(query);
    let entries = storage
        .list_timetable(
            scope,
            TimetableListQuery {
                teacher_id: Some(teacher_id),
                academic_year: Some(academic_year.clone()),
                ..Default::default()
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(group_by_weekday(
        academic_year,
        entries,
    ))))
}

fn resolve_year(query: AcademicYearQuery) -> String {
    query
        .academic_year
        .filter(|y| !y.trim().is_empty())
        .unwrap_or_else(|| current_academic_year(Utc::now().date_naive()))
}

/// 按周一到周日分组，每天按节次排序
fn group_by_weekday(academic_year: String, entries: Vec<TimetableEntryView>) -> WeeklyTimetable {
    let mut days: Vec<DaySchedule> = WEEK_ORDER
        .iter()
        .map(|&day| DaySchedule {
            day_of_week: day,
            day_name: day_name(day).to_string(),
            periods: Vec::new(),
        })
        .collect();

    for entry in entries {
        if let Some(day) = days
            .iter_mut()
            .find(|d| d.day_of_week == entry.entry.day_of_week)
        {
            day.periods.push(entry);
        }
    }
    for day in &mut days {
        day.periods.sort_by_key(|p| p.entry.period_number);
    }

    WeeklyTimetable {
        academic_year,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timetable::entities::TimetableEntry;

    fn view(id: i64, day_of_week: i32, period_number: i32) -> TimetableEntryView {
        TimetableEntryView {
            entry: TimetableEntry {
                id,
                school_id: 1,
                class_id: 1,
                subject_id: 1,
                teacher_id: 1,
                day_of_week,
                period_number,
                start_time: "09:00".into(),
                end_time: "09:45".into(),
                room_number: None,
                academic_year: "2025-26".into(),
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            class: None,
            subject: None,
            teacher: None,
        }
    }

    #[test]
    fn test_week_starts_on_monday() {
        let weekly = group_by_weekday(
            "2025-26".into(),
            vec![view(1, 0, 1), view(2, 1, 3), view(3, 1, 1)],
        );

        assert_eq!(weekly.days.len(), 7);
        assert_eq!(weekly.days[0].day_name, "Monday");
        assert_eq!(weekly.days[6].day_name, "Sunday");

        let monday: Vec<i64> = weekly.days[0].periods.iter().map(|p| p.entry.id).collect();
        assert_eq!(monday, vec![3, 2]);
        assert_eq!(weekly.days[6].periods.len(), 1);
        assert!(weekly.days[1].periods.is_empty());
    }
}
