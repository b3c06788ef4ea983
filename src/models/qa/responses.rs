use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::QaMessage;
use crate::models::{students::entities::StudentBrief, users::entities::UserBrief};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "qa.ts")]
pub struct QaView {
    #[serde(flatten)]
    pub message: QaMessage,
    pub parent: Option<UserBrief>,
    pub class_teacher: Option<UserBrief>,
    pub student: Option<StudentBrief>,
}
