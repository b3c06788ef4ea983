//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub class_id: i64,
    pub parent_id: Option<i64>,
    pub roll_number: String,
    pub admission_number: String,
    pub admission_date: Date,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub father_phone: Option<String>,
    pub mother_phone: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use super::to_datetime;

        crate::models::students::entities::Student {
            id: self.id,
            user_id: self.user_id,
            class_id: self.class_id,
            parent_id: self.parent_id,
            roll_number: self.roll_number,
            admission_number: self.admission_number,
            admission_date: self.admission_date,
            father_name: self.father_name,
            mother_name: self.mother_name,
            father_phone: self.father_phone,
            mother_phone: self.mother_phone,
            blood_group: self.blood_group,
            emergency_contact: self.emergency_contact,
            is_active: self.is_active,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
