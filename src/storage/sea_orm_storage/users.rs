use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::prelude::Users;
use crate::entity::users::{ActiveModel, Column};
use crate::errors::Result;
use crate::models::users::{
    entities::{User, UserRole},
    requests::{NewUser, UpdateUserRequest},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 新用户的 ActiveModel，事务内外共用
    pub(crate) fn user_active_model(user: NewUser, now: i64) -> ActiveModel {
        ActiveModel {
            school_id: Set(user.school_id),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone: Set(user.phone),
            date_of_birth: Set(user.date_of_birth),
            gender: Set(user.gender),
            is_active: Set(true),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// 创建用户
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        let result = Self::user_active_model(user, now_ts())
            .insert(&self.db)
            .await
            .map_err(db_error("创建用户失败"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_school_user_impl(&self, school_id: i64, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新用户失败"))?;

        Ok(Some(updated.into_user()))
    }

    pub async fn update_user_password_impl(&self, id: i64, password_hash: String) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("更新密码失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("更新登录时间失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 软删除用户
    pub async fn deactivate_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("停用用户失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_active_teacher_user_impl(&self, school_id: i64, user_id: i64) -> Result<bool> {
        let count = Users::find_by_id(user_id)
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::IsActive.eq(true))
            .filter(Column::Role.is_in([UserRole::CLASS_TEACHER, UserRole::SUBJECT_TEACHER]))
            .count(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?;

        Ok(count > 0)
    }
}
