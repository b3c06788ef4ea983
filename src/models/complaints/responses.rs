use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Complaint;
use crate::models::{students::entities::StudentBrief, users::entities::UserBrief};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "complaint.ts")]
pub struct ComplaintView {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub student: Option<StudentBrief>,
    pub complainant: Option<UserBrief>,
    pub class_teacher: Option<UserBrief>,
}
