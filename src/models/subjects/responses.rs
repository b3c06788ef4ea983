use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::SubjectBrief;

// 教师可教授的科目：来自课表，或退回到教师档案中的科目名称
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "subject.ts")]
pub struct TeacherSubjectsResponse {
    pub subjects: Vec<SubjectBrief>,
    pub subject_names: Vec<String>,
    pub from_timetable: bool,
}
