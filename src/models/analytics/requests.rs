use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginationQuery;
use crate::models::common::query::opt_i64;

pub const DEFAULT_PERIOD_DAYS: i64 = 30;
/// 统计窗口上限（约十年）
pub const MAX_PERIOD_DAYS: i64 = 3650;

/// 非正数取默认窗口，过大的取上限
pub fn clamp_period(period: Option<i64>) -> i64 {
    period
        .filter(|p| *p > 0)
        .map_or(DEFAULT_PERIOD_DAYS, |p| p.min(MAX_PERIOD_DAYS))
}

/// `days` 天之前，溢出时退回默认窗口
pub fn days_before(days: i64) -> TimeDelta {
    TimeDelta::try_days(days)
        .or_else(|| TimeDelta::try_days(DEFAULT_PERIOD_DAYS))
        .unwrap_or(TimeDelta::zero())
}

// 分析类接口的公共查询参数
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "opt_i64")]
    pub period: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub subject_id: Option<i64>,
    pub exam_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AnalyticsQuery {
    pub fn period_days(&self) -> i64 {
        clamp_period(self.period)
    }

    /// 同时给出起止日期时使用它们，否则取 `[today - period, today]`
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        DateRange::resolve(self.start_date, self.end_date, self.period_days(), today)
    }
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self {
            pagination: PaginationQuery::default(),
            period: None,
            class_id: None,
            student_id: None,
            subject_id: None,
            exam_type: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "analytics.ts")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        period_days: i64,
        today: NaiveDate,
    ) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => DateRange { start, end },
            _ => DateRange {
                start: today
                    .checked_sub_signed(days_before(period_days))
                    .or_else(|| today.checked_sub_signed(days_before(DEFAULT_PERIOD_DAYS)))
                    .unwrap_or(today),
                end: today,
            },
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_explicit_range_wins() {
        let q = AnalyticsQuery {
            start_date: Some(d(2025, 1, 1)),
            end_date: Some(d(2025, 1, 31)),
            period: Some(7),
            ..Default::default()
        };
        let range = q.date_range(d(2025, 6, 1));
        assert_eq!(range.start, d(2025, 1, 1));
        assert_eq!(range.end, d(2025, 1, 31));
    }

    #[test]
    fn test_period_fallback() {
        let q = AnalyticsQuery {
            start_date: Some(d(2025, 1, 1)),
            ..Default::default()
        };
        let range = q.date_range(d(2025, 3, 31));
        assert_eq!(range.start, d(2025, 3, 1));
        assert_eq!(range.end, d(2025, 3, 31));

        let q = AnalyticsQuery {
            period: Some(-3),
            ..Default::default()
        };
        assert_eq!(q.period_days(), DEFAULT_PERIOD_DAYS);
    }

    #[test]
    fn test_huge_period_is_clamped() {
        let q = Query::<AnalyticsQuery>::from_query("period=100000000").unwrap();
        assert_eq!(q.period_days(), MAX_PERIOD_DAYS);
        let today = d(2025, 6, 1);
        let range = q.date_range(today);
        assert_eq!(range.start, today - TimeDelta::days(MAX_PERIOD_DAYS));
        assert_eq!(range.end, today);

        // 绕过上限直接传入极端值也不会溢出
        let range = DateRange::resolve(None, None, i64::MAX, today);
        assert_eq!(range.start, today - TimeDelta::days(DEFAULT_PERIOD_DAYS));
        let range = DateRange::resolve(None, None, 9_000_000_000_000_000, today);
        assert_eq!(range.end, today);

        assert_eq!(clamp_period(Some(i64::MAX)), MAX_PERIOD_DAYS);
        assert_eq!(clamp_period(Some(0)), DEFAULT_PERIOD_DAYS);
        assert_eq!(days_before(i64::MAX), TimeDelta::days(DEFAULT_PERIOD_DAYS));
    }

    #[test]
    fn test_range_contains() {
        let range = DateRange {
            start: d(2025, 3, 3),
            end: d(2025, 3, 9),
        };
        assert!(range.contains(d(2025, 3, 3)));
        assert!(range.contains(d(2025, 3, 9)));
        assert!(!range.contains(d(2025, 3, 10)));
    }
}
