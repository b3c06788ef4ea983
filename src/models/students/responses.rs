use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Student;
use crate::models::{classes::entities::ClassBrief, users::entities::UserBrief};

// 学生列表项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct StudentListItem {
    #[serde(flatten)]
    pub student: Student,
    pub user: UserBrief,
    pub class: ClassBrief,
    pub parent: Option<UserBrief>,
}

// 新建学生，临时密码只返回一次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "student.ts")]
pub struct CreatedStudent {
    pub student: StudentListItem,
    pub temporary_password: String,
}
