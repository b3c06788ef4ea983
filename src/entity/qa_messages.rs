//! 家校问答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qa_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub parent_id: i64,
    pub class_teacher_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reply: Option<String>,
    pub status: String,
    pub priority: String,
    pub replied_at: Option<i64>,
    pub closed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_message(self) -> crate::models::qa::entities::QaMessage {
        use super::to_datetime;
        use crate::models::qa::entities::{QaMessage, QaStatus};

        QaMessage {
            id: self.id,
            parent_id: self.parent_id,
            class_teacher_id: self.class_teacher_id,
            student_id: self.student_id,
            message: self.message,
            reply: self.reply,
            status: self.status.parse::<QaStatus>().unwrap_or(QaStatus::Pending),
            priority: self.priority.parse().unwrap_or_default(),
            replied_at: self.replied_at.map(to_datetime),
            closed_at: self.closed_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
