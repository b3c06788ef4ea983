pub mod admin;
pub mod parent;
pub mod student;
pub mod teacher;

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use crate::models::PaginationQuery;
use crate::models::analytics::{facts::AttendanceFact, requests::DateRange};
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::dashboard::responses::TeacherLoad;
use crate::models::timetable::responses::TimetableEntryView;
use crate::utils::metrics::StatusTally;

pub const RECENT_PEOPLE: u64 = 5;
pub const RECENT_ITEMS: u64 = 10;

super::lazy_storage_service!(DashboardService);

impl DashboardService {
    pub async fn admin(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::admin_dashboard(self, request).await
    }

    pub async fn teacher(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }

    pub async fn parent(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::parent_dashboard(self, request).await
    }

    pub async fn student(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, request).await
    }
}

pub(crate) fn first_page(limit: u64) -> PaginationQuery {
    PaginationQuery {
        page: 1,
        limit: limit as i64,
    }
}

pub(crate) fn single_day(date: NaiveDate) -> DateRange {
    DateRange {
        start: date,
        end: date,
    }
}

/// 出勤率取整
pub(crate) fn rounded_attendance(facts: &[AttendanceFact]) -> i64 {
    StatusTally::from_statuses(facts.iter().map(|f| f.status))
        .attendance_rate()
        .round() as i64
}

/// 各班出勤人数
pub(crate) fn present_by_class(facts: &[AttendanceFact]) -> HashMap<i64, i64> {
    let mut present = HashMap::new();
    for fact in facts
        .iter()
        .filter(|f| f.status == AttendanceStatus::Present)
    {
        *present.entry(fact.class_id).or_insert(0) += 1;
    }
    present
}

/// 按课时数降序的教师工作量
pub(crate) fn teacher_loads(entries: &[TimetableEntryView]) -> Vec<TeacherLoad> {
    let mut by_teacher: HashMap<i64, (String, i64, Vec<i64>)> = HashMap::new();
    for view in entries {
        let name = view
            .teacher
            .as_ref()
            .map(|t| format!("{} {}", t.first_name, t.last_name))
            .unwrap_or_default();
        let load = by_teacher
            .entry(view.entry.teacher_id)
            .or_insert_with(|| (name, 0, Vec::new()));
        load.1 += 1;
        if !load.2.contains(&view.entry.class_id) {
            load.2.push(view.entry.class_id);
        }
    }

    let mut loads: Vec<TeacherLoad> = by_teacher
        .into_iter()
        .map(|(teacher_id, (name, periods, classes))| TeacherLoad {
            teacher_id,
            name,
            periods,
            classes: classes.len() as i64,
        })
        .collect();
    loads.sort_by(|a, b| {
        b.periods
            .cmp(&a.periods)
            .then_with(|| a.teacher_id.cmp(&b.teacher_id))
    });
    loads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timetable::entities::TimetableEntry;
    use crate::models::users::entities::UserBrief;
    use chrono::Utc;

    fn entry(id: i64, teacher_id: i64, class_id: i64) -> TimetableEntryView {
        TimetableEntryView {
            entry: TimetableEntry {
                id,
                school_id: 1,
                class_id,
                subject_id: 1,
                teacher_id,
                day_of_week: 1,
                period_number: id as i32,
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
            teacher: Some(UserBrief {
                id: teacher_id,
                first_name: "Ada".into(),
                last_name: format!("T{teacher_id}"),
                email: format!("t{teacher_id}@example.com"),
            }),
        }
    }

    fn fact(class_id: i64, status: AttendanceStatus) -> AttendanceFact {
        AttendanceFact {
            record_id: 1,
            student_id: 1,
            class_id,
            date: Utc::now().date_naive(),
            status,
            marked_by: 2,
            class_name: "Grade 1".into(),
            section: "A".into(),
            first_name: "Sam".into(),
            last_name: "Doe".into(),
            roll_number: "001".into(),
        }
    }

    #[test]
    fn test_teacher_loads_sorted_by_periods() {
        let entries = vec![entry(1, 10, 1), entry(2, 11, 1), entry(3, 11, 2), entry(4, 11, 2)];
        let loads = teacher_loads(&entries);
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].teacher_id, 11);
        assert_eq!(loads[0].periods, 3);
        assert_eq!(loads[0].classes, 2);
        assert_eq!(loads[0].name, "Ada T11");
        assert_eq!(loads[1].periods, 1);
    }

    #[test]
    fn test_today_attendance_counts() {
        use AttendanceStatus::*;
        let facts = vec![fact(1, Present), fact(1, Absent), fact(2, Present)];
        // 2 / 3 = 66.67 取整
        assert_eq!(rounded_attendance(&facts), 67);
        assert_eq!(rounded_attendance(&[]), 0);

        let present = present_by_class(&facts);
        assert_eq!(present[&1], 1);
        assert_eq!(present[&2], 1);
    }
}
