use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use futures_util::future::{join, try_join4};

use super::{DashboardService, RECENT_ITEMS, first_page};
use crate::models::ApiResponse;
use crate::models::analytics::{
    facts::FactFilter,
    requests::{DEFAULT_PERIOD_DAYS, DateRange},
};
use crate::models::dashboard::responses::{ChildOverview, ParentDashboard};
use crate::models::grades::requests::GradeListQuery;
use crate::models::homework::requests::HomeworkListQuery;
use crate::models::qa::requests::QaListQuery;
use crate::services::analytics::grades_or_default;
use crate::services::current_scope;
use crate::utils::metrics::attendance_summary;

pub async fn parent_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (user, scope) = current_scope(request)?;
    let range = DateRange::resolve(None, None, DEFAULT_PERIOD_DAYS, Utc::now().date_naive());

    let children = storage.scoped_students(scope).await?;
    let mut class_ids: Vec<i64> = children.iter().map(|c| c.student.class_id).collect();
    class_ids.sort_unstable();
    class_ids.dedup();

    let homework_query = HomeworkListQuery {
        is_published: Some(true),
        ..HomeworkListQuery::new(first_page(RECENT_ITEMS))
    };
    let grade_query = GradeListQuery {
        pagination: first_page(RECENT_ITEMS),
        student_id: None,
        subject_id: None,
        exam_type: None,
    };
    let question_query = QaListQuery {
        pagination: first_page(RECENT_ITEMS),
        status: None,
        student_id: None,
    };

    let (loaded, grades) = join(
        try_join4(
            storage.attendance_facts(scope, FactFilter::in_range(range)),
            storage.list_homework(scope, homework_query),
            storage.announcements(user.school_id, class_ids, RECENT_ITEMS),
            storage.list_qa(scope, question_query),
        ),
        storage.list_grades(scope, grade_query, None),
    )
    .await;
    let (attendance, homework, announcements, questions) = loaded?;
    let recent_grades = grades_or_default(grades.map(|page| page.items), "parent dashboard");

    let mut statuses: HashMap<i64, Vec<_>> = HashMap::new();
    for fact in &attendance {
        statuses.entry(fact.student_id).or_default().push(fact.status);
    }
    let children = children
        .into_iter()
        .map(|student| ChildOverview {
            attendance: attendance_summary(
                statuses.remove(&student.student.id).unwrap_or_default(),
            ),
            student,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(ParentDashboard {
        children,
        homework: homework.items,
        recent_grades,
        announcements,
        questions: questions.items,
    })))
}
