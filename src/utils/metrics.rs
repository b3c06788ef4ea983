//! 统计指标计算
//!
//! 所有百分比、平均值都在这里统一保留两位小数。

use crate::models::attendance::entities::AttendanceStatus;
use crate::models::attendance::responses::AttendanceSummary;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// part / total * 100，分母为 0 时返回 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}

/// 按状态统计考勤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub excused: u64,
}

impl StatusTally {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let mut tally = StatusTally::default();
        for status in statuses {
            tally.add(status);
        }
        tally
    }

    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    pub fn count(&self, status: AttendanceStatus) -> u64 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::Excused => self.excused,
        }
    }

    pub fn total(&self) -> u64 {
        self.present + self.absent + self.late + self.excused
    }

    /// 出勤率（仅 present 计入）
    pub fn attendance_rate(&self) -> f64 {
        percentage(self.present, self.total())
    }

    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary {
            total_days: self.total() as i64,
            present: self.present as i64,
            absent: self.absent as i64,
            late: self.late as i64,
            excused: self.excused as i64,
            attendance_percentage: self.attendance_rate(),
        }
    }
}

pub fn attendance_summary<I>(statuses: I) -> AttendanceSummary
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    StatusTally::from_statuses(statuses).summary()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.0), 12.0);
    }

    #[test]
    fn test_percentage_handles_empty_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[80.0, 90.0, 95.5]), 88.5);
    }

    #[test]
    fn test_attendance_summary() {
        use AttendanceStatus::*;
        let summary = attendance_summary([Present, Present, Absent, Late]);
        assert_eq!(summary.total_days, 4);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.attendance_percentage, 50.0);

        let empty = attendance_summary(std::iter::empty());
        assert_eq!(empty.attendance_percentage, 0.0);
    }
}
