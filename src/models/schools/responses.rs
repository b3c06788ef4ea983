use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学校统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "school.ts")]
pub struct SchoolStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub total_parents: i64,
    pub total_subjects: i64,
}
