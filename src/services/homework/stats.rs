use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use super::HomeworkService;
use crate::models::ApiResponse;
use crate::models::analytics::facts::HomeworkFact;
use crate::models::homework::{requests::HomeworkStatsQuery, responses::HomeworkStats};
use crate::services::current_scope;
use crate::utils::metrics::average;

pub async fn get_stats(
    service: &HomeworkService,
    request: &HttpRequest,
    query: HomeworkStatsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    let facts = storage
        .homework_facts(scope, query.class_id, query.teacher_id, None)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(homework_stats(&facts, Utc::now()))))
}

/// 逾期指已发布且截止时间已过的作业
pub(crate) fn homework_stats(facts: &[HomeworkFact], now: DateTime<Utc>) -> HomeworkStats {
    let published = facts.iter().filter(|f| f.is_published).count() as i64;
    let overdue = facts
        .iter()
        .filter(|f| f.is_published && f.due_date < now)
        .count() as i64;
    let marks: Vec<f64> = facts.iter().flat_map(|f| f.marks.iter().copied()).collect();

    HomeworkStats {
        total_homework: facts.len() as i64,
        published,
        drafts: facts.len() as i64 - published,
        overdue,
        total_submissions: facts.iter().map(|f| f.submission_count).sum(),
        average_marks: average(&marks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fact(id: i64, is_published: bool, due_in_days: i64, marks: Vec<f64>) -> HomeworkFact {
        let now = Utc::now();
        HomeworkFact {
            homework_id: id,
            class_id: 1,
            teacher_id: 1,
            is_published,
            due_date: now + Duration::days(due_in_days),
            created_at: now - Duration::days(10),
            submission_count: marks.len() as i64 + 1,
            marks,
        }
    }

    #[test]
    fn test_homework_stats() {
        let facts = vec![
            fact(1, true, -1, vec![8.0, 9.0]),
            fact(2, true, 3, vec![10.0]),
            fact(3, false, -5, vec![]),
        ];
        let stats = homework_stats(&facts, Utc::now());

        assert_eq!(stats.total_homework, 3);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.drafts, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.total_submissions, 6);
        assert_eq!(stats.average_marks, 9.0);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(homework_stats(&[], Utc::now()), HomeworkStats::default());
    }
}
