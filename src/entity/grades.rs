//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub exam_type: String,
    pub exam_name: String,
    #[sea_orm(column_type = "Double")]
    pub marks_obtained: f64,
    #[sea_orm(column_type = "Double")]
    pub total_marks: f64,
    #[sea_orm(column_type = "Double")]
    pub percentage: f64,
    pub grade: String,
    pub exam_date: Date,
    pub remarks: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        crate::models::grades::entities::Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            exam_type: self.exam_type,
            exam_name: self.exam_name,
            marks_obtained: self.marks_obtained,
            total_marks: self.total_marks,
            percentage: self.percentage,
            grade: self.grade,
            exam_date: self.exam_date,
            remarks: self.remarks,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
