//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub employee_id: String,
    pub qualification: Option<String>,
    /// JSON 数组形式的科目名称
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    pub joining_date: Date,
    pub experience_years: i32,
    pub is_class_teacher: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use super::to_datetime;

        crate::models::teachers::entities::Teacher {
            id: self.id,
            user_id: self.user_id,
            employee_id: self.employee_id,
            qualification: self.qualification,
            subjects: serde_json::from_str(&self.subjects).unwrap_or_default(),
            joining_date: self.joining_date,
            experience_years: self.experience_years,
            is_class_teacher: self.is_class_teacher,
            is_active: self.is_active,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
