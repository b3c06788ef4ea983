use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Homework, HomeworkSubmission};
use crate::models::{
    classes::entities::ClassBrief, subjects::entities::SubjectBrief, users::entities::UserBrief,
};

// 作业详情（附带班级、科目、教师和提交数）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "homework.ts")]
pub struct HomeworkView {
    #[serde(flatten)]
    pub homework: Homework,
    pub class: Option<ClassBrief>,
    pub subject: Option<SubjectBrief>,
    pub teacher: Option<UserBrief>,
    pub submission_count: i64,
}

// 学生视角：作业及自己的提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "homework.ts")]
pub struct StudentHomeworkItem {
    pub homework: HomeworkView,
    pub submission: Option<HomeworkSubmission>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "homework.ts")]
pub struct HomeworkStats {
    pub total_homework: i64,
    pub published: i64,
    pub drafts: i64,
    pub overdue: i64,
    pub total_submissions: i64,
    pub average_marks: f64,
}
