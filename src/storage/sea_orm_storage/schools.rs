//! 学校存储操作

use super::{SeaOrmStorage, db_error, now_ts, scope};
use crate::entity::prelude::{Classes, Schools, Students, Subjects, Teachers, Users};
use crate::entity::{classes, schools, students, subjects, teachers, users};
use crate::errors::Result;
use crate::models::{
    AccessScope,
    schools::{
        entities::School,
        requests::{NewSchool, UpdateSchoolRequest},
        responses::SchoolStats,
    },
    users::{entities::User, entities::UserRole, requests::NewUser},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 注册学校并创建管理员账号
    pub async fn register_school_impl(
        &self,
        school: NewSchool,
        admin: NewUser,
    ) -> Result<(School, User)> {
        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let school = schools::ActiveModel {
            name: Set(school.name),
            address: Set(school.address),
            city: Set(school.city),
            state: Set(school.state),
            country: Set(school.country),
            pincode: Set(school.pincode),
            phone: Set(school.phone),
            email: Set(school.email),
            website: Set(school.website),
            domain: Set(school.domain),
            timezone: Set(school.timezone),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("创建学校失败"))?;

        let admin = Self::user_active_model(
            NewUser {
                school_id: school.id,
                ..admin
            },
            now,
        )
        .insert(&txn)
        .await
        .map_err(db_error("创建管理员失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok((school.into_school(), admin.into_user()))
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<Option<School>> {
        let result = Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学校失败"))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn get_school_by_email_impl(&self, email: &str) -> Result<Option<School>> {
        let result = Schools::find()
            .filter(schools::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error("查询学校失败"))?;

        Ok(result.map(|m| m.into_school()))
    }

    /// 更新学校资料
    pub async fn update_school_impl(
        &self,
        id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>> {
        let Some(existing) = Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学校失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(city) = update.city {
            model.city = Set(Some(city));
        }
        if let Some(state) = update.state {
            model.state = Set(Some(state));
        }
        if let Some(country) = update.country {
            model.country = Set(Some(country));
        }
        if let Some(pincode) = update.pincode {
            model.pincode = Set(Some(pincode));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(website) = update.website {
            model.website = Set(Some(website));
        }
        if let Some(timezone) = update.timezone {
            model.timezone = Set(timezone);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新学校失败"))?;

        Ok(Some(updated.into_school()))
    }

    /// 学校概况计数（仅统计有效记录）
    pub async fn get_school_stats_impl(&self, school_id: i64) -> Result<SchoolStats> {
        let school = AccessScope::school(school_id);

        let total_students = Students::find()
            .filter(students::Column::ClassId.in_subquery(scope::class_ids(&school)))
            .filter(students::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计学生失败"))?;

        let total_teachers = Teachers::find()
            .filter(teachers::Column::UserId.in_subquery(scope::school_user_ids(school_id)))
            .filter(teachers::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计教师失败"))?;

        let total_classes = Classes::find()
            .filter(classes::Column::SchoolId.eq(school_id))
            .filter(classes::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计班级失败"))?;

        let total_parents = Users::find()
            .filter(users::Column::SchoolId.eq(school_id))
            .filter(users::Column::Role.eq(UserRole::PARENT))
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计家长失败"))?;

        let total_subjects = Subjects::find()
            .filter(subjects::Column::SchoolId.eq(school_id))
            .filter(subjects::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计科目失败"))?;

        Ok(SchoolStats {
            total_students: total_students as i64,
            total_teachers: total_teachers as i64,
            total_classes: total_classes as i64,
            total_parents: total_parents as i64,
            total_subjects: total_subjects as i64,
        })
    }
}
