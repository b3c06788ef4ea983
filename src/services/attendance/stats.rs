use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::analytics::{facts::FactFilter, requests::DateRange};
use crate::models::attendance::{
    requests::AttendanceStatsQuery, responses::AttendanceStats,
};
use crate::models::ApiResponse;
use crate::services::current_scope;
use crate::utils::metrics::StatusTally;

pub async fn get_stats(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceStatsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let (_, scope) = current_scope(request)?;

    // 起止日期需同时给出，否则统计全部记录
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        _ => None,
    };
    let filter = FactFilter {
        range,
        class_id: query.class_id,
        student_id: query.student_id,
        ..Default::default()
    };

    let facts = storage.attendance_facts(scope, filter).await?;
    let tally = StatusTally::from_statuses(facts.iter().map(|f| f.status));

    Ok(HttpResponse::Ok().json(ApiResponse::data(build_stats(&tally, range))))
}

fn build_stats(tally: &StatusTally, range: Option<DateRange>) -> AttendanceStats {
    AttendanceStats {
        total_records: tally.total() as i64,
        present: tally.present as i64,
        absent: tally.absent as i64,
        late: tally.late as i64,
        excused: tally.excused as i64,
        attendance_rate: tally.attendance_rate(),
        period: match range {
            Some(r) => format!("{} to {}", r.start, r.end),
            None => "All time".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use chrono::NaiveDate;

    #[test]
    fn test_stats_period_and_rate() {
        let tally = StatusTally::from_statuses([
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
        ]);

        let all_time = build_stats(&tally, None);
        assert_eq!(all_time.period, "All time");
        assert_eq!(all_time.total_records, 3);
        assert_eq!(all_time.attendance_rate, 66.67);

        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        let ranged = build_stats(&StatusTally::default(), Some(range));
        assert_eq!(ranged.period, "2025-01-01 to 2025-01-31");
        assert_eq!(ranged.attendance_rate, 0.0);
    }
}
