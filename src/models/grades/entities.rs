use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub exam_type: String,
    pub exam_name: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 百分比对应的等级
pub fn grade_letter(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B+",
        p if p >= 60.0 => "B",
        p if p >= 50.0 => "C",
        p if p >= 40.0 => "D",
        _ => "F",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_letter_boundaries() {
        assert_eq!(grade_letter(100.0), "A+");
        assert_eq!(grade_letter(90.0), "A+");
        assert_eq!(grade_letter(89.99), "A");
        assert_eq!(grade_letter(70.0), "B+");
        assert_eq!(grade_letter(55.0), "C");
        assert_eq!(grade_letter(40.0), "D");
        assert_eq!(grade_letter(12.5), "F");
    }
}
