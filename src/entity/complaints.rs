//! 投诉实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub complainant_id: i64,
    pub class_teacher_id: Option<i64>,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub resolution: Option<String>,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_complaint(self) -> crate::models::complaints::entities::Complaint {
        use super::to_datetime;
        use crate::models::complaints::entities::{Complaint, ComplaintStatus};

        Complaint {
            id: self.id,
            student_id: self.student_id,
            complainant_id: self.complainant_id,
            class_teacher_id: self.class_teacher_id,
            subject: self.subject,
            description: self.description,
            category: self.category,
            status: self
                .status
                .parse::<ComplaintStatus>()
                .unwrap_or(ComplaintStatus::Open),
            priority: self.priority.parse().unwrap_or_default(),
            resolution: self.resolution,
            resolved_by: self.resolved_by,
            resolved_at: self.resolved_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
