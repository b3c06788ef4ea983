use serde::Deserialize;

// 字段全部可选，缺失时由服务层返回 400
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimetableRequest {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub period_number: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room_number: Option<String>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimetableRequest {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub period_number: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room_number: Option<String>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableListQuery {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearQuery {
    pub academic_year: Option<String>,
}

/// 校验后的课表数据，用于新建和更新
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableSlot {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub period_number: i32,
    pub start_time: String,
    pub end_time: String,
    pub room_number: Option<String>,
    pub academic_year: String,
}

impl TimetableSlot {
    /// 教师时段是否发生变化（决定是否需要重新检查教师冲突）
    pub fn teacher_slot_changed(&self, other: &TimetableSlot) -> bool {
        self.teacher_id != other.teacher_id
            || self.day_of_week != other.day_of_week
            || self.period_number != other.period_number
            || self.academic_year != other.academic_year
    }

    /// 合并更新字段
    pub fn merged(&self, update: UpdateTimetableRequest) -> TimetableSlot {
        TimetableSlot {
            class_id: update.class_id.unwrap_or(self.class_id),
            subject_id: update.subject_id.unwrap_or(self.subject_id),
            teacher_id: update.teacher_id.unwrap_or(self.teacher_id),
            day_of_week: update.day_of_week.unwrap_or(self.day_of_week),
            period_number: update.period_number.unwrap_or(self.period_number),
            start_time: update.start_time.unwrap_or_else(|| self.start_time.clone()),
            end_time: update.end_time.unwrap_or_else(|| self.end_time.clone()),
            room_number: update.room_number.or_else(|| self.room_number.clone()),
            academic_year: update
                .academic_year
                .unwrap_or_else(|| self.academic_year.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> TimetableSlot {
        TimetableSlot {
            class_id: 1,
            subject_id: 2,
            teacher_id: 3,
            day_of_week: 1,
            period_number: 1,
            start_time: "09:00".into(),
            end_time: "09:45".into(),
            room_number: None,
            academic_year: "2025-26".into(),
        }
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let merged = slot().merged(UpdateTimetableRequest {
            room_number: Some("B12".into()),
            ..Default::default()
        });
        assert_eq!(merged.room_number.as_deref(), Some("B12"));
        assert!(!merged.teacher_slot_changed(&slot()));
    }

    #[test]
    fn test_teacher_slot_change_detection() {
        let moved = slot().merged(UpdateTimetableRequest {
            period_number: Some(2),
            ..Default::default()
        });
        assert!(moved.teacher_slot_changed(&slot()));

        let new_subject = slot().merged(UpdateTimetableRequest {
            subject_id: Some(9),
            ..Default::default()
        });
        assert!(!new_subject.teacher_slot_changed(&slot()));
    }
}
