use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 按 `day_of_week` 编号（0 = 周日）排列的星期名称
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// 周视图的展示顺序：周一到周日
pub const WEEK_ORDER: [i32; 7] = [1, 2, 3, 4, 5, 6, 0];

// 课表条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "timetable.ts")]
pub struct TimetableEntry {
    pub id: i64,
    pub school_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub period_number: i32,
    pub start_time: String,
    pub end_time: String,
    pub room_number: Option<String>,
    pub academic_year: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn day_name(day_of_week: i32) -> &'static str {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|d| DAY_NAMES.get(d))
        .copied()
        .unwrap_or("Unknown")
}

/// 给定日期对应的 `day_of_week`（0 = 周日）
pub fn weekday_number(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// 当前学年，例如 2025 年 4 月之后为 `2025-26`
pub fn current_academic_year(today: NaiveDate) -> String {
    let start = if today.month() >= 4 {
        today.year()
    } else {
        today.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_name() {
        assert_eq!(day_name(0), "Sunday");
        assert_eq!(day_name(6), "Saturday");
        assert_eq!(day_name(7), "Unknown");
        assert_eq!(day_name(-1), "Unknown");
    }

    #[test]
    fn test_weekday_number() {
        // 2025-03-02 是周日
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(weekday_number(sunday), 0);
        assert_eq!(weekday_number(sunday.succ_opt().unwrap()), 1);
    }

    #[test]
    fn test_current_academic_year() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(current_academic_year(d), "2024-25");
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(current_academic_year(d), "2025-26");
        let d = NaiveDate::from_ymd_opt(2099, 6, 1).unwrap();
        assert_eq!(current_academic_year(d), "2099-00");
    }
}
