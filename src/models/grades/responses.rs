use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Grade;
use crate::models::{students::entities::StudentBrief, subjects::entities::SubjectBrief};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "grade.ts")]
pub struct GradeView {
    #[serde(flatten)]
    pub grade: Grade,
    pub student: Option<StudentBrief>,
    pub subject: Option<SubjectBrief>,
}
