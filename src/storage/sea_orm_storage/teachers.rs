//! 教师存储操作

use super::{SeaOrmStorage, db_error, fetch_page, like_keyword, now_ts, scope, search_keyword};
use crate::entity::prelude::{TeacherModel, Teachers, Users};
use crate::entity::teachers::{ActiveModel, Column};
use crate::entity::users;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse,
    teachers::{
        requests::{NewTeacher, TeacherListQuery, UpdateTeacherRequest},
        responses::{TeacherListItem, TeacherStats},
    },
    users::entities::UserRole,
};
use crate::utils::metrics::{average, round2};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, Select, Set, TransactionTrait,
};

/// 科目名称以 JSON 数组存储
fn encode_subjects(subjects: &[String]) -> Result<String> {
    serde_json::to_string(subjects)
        .map_err(|e| SchoolError::serialization(format!("科目序列化失败: {e}")))
}

fn school_teachers(school_id: i64) -> Select<Teachers> {
    Teachers::find().filter(Column::UserId.in_subquery(scope::school_user_ids(school_id)))
}

impl SeaOrmStorage {
    pub(crate) async fn teacher_items(
        &self,
        models: Vec<TeacherModel>,
    ) -> Result<Vec<TeacherListItem>> {
        let users = self.user_models(models.iter().map(|t| t.user_id)).await?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let user = users.get(&m.user_id)?;
                Some(TeacherListItem {
                    user: user.brief(),
                    role: user.role.parse().unwrap_or(UserRole::SubjectTeacher),
                    phone: user.phone.clone(),
                    teacher: m.into_teacher(),
                })
            })
            .collect())
    }

    /// 创建教师：用户账号与教师档案同一事务
    pub async fn create_teacher_impl(&self, teacher: NewTeacher) -> Result<TeacherListItem> {
        let now = now_ts();
        let subjects = encode_subjects(&teacher.subjects)?;
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let user = Self::user_active_model(teacher.user, now)
            .insert(&txn)
            .await
            .map_err(db_error("创建教师用户失败"))?;

        let model = ActiveModel {
            user_id: Set(user.id),
            employee_id: Set(teacher.employee_id),
            qualification: Set(teacher.qualification),
            subjects: Set(subjects),
            joining_date: Set(teacher.joining_date),
            experience_years: Set(teacher.experience_years),
            is_class_teacher: Set(teacher.is_class_teacher),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("创建教师档案失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        self.teacher_items(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("教师创建后读取失败"))
    }

    pub async fn get_teacher_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<TeacherListItem>> {
        let Some(model) = school_teachers(school_id)
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?
        else {
            return Ok(None);
        };

        Ok(self.teacher_items(vec![model]).await?.pop())
    }

    pub async fn get_teacher_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherListItem>> {
        let Some(model) = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?
        else {
            return Ok(None);
        };

        Ok(self.teacher_items(vec![model]).await?.pop())
    }

    /// 分页列出教师，支持按工号、姓名、邮箱搜索
    pub async fn list_teachers_impl(
        &self,
        school_id: i64,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<TeacherListItem>> {
        let mut select = school_teachers(school_id);

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }
        if let Some(keyword) = search_keyword(query.search.as_deref()) {
            let matching_users = Users::find()
                .select_only()
                .column(users::Column::Id)
                .filter(
                    Condition::any()
                        .add(users::Column::FirstName.like(like_keyword(keyword)))
                        .add(users::Column::LastName.like(like_keyword(keyword)))
                        .add(users::Column::Email.like(like_keyword(keyword))),
                )
                .into_query();

            select = select.filter(
                Condition::any()
                    .add(Column::EmployeeId.like(like_keyword(keyword)))
                    .add(Column::UserId.in_subquery(matching_users)),
            );
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询教师列表失败").await?;

        Ok(PaginatedResponse {
            items: self.teacher_items(models).await?,
            pagination,
        })
    }

    pub async fn active_teachers_impl(&self, school_id: i64) -> Result<Vec<TeacherListItem>> {
        let models = school_teachers(school_id)
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::EmployeeId)
            .all(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?;

        self.teacher_items(models).await
    }

    pub async fn recent_teachers_impl(
        &self,
        school_id: i64,
        limit: u64,
    ) -> Result<Vec<TeacherListItem>> {
        let models = school_teachers(school_id)
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?;

        self.teacher_items(models).await
    }

    /// 更新教师档案；班主任标记变化时同步用户角色
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherListItem>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let user_id = existing.user_id;
        let subjects = update.subjects.as_deref().map(encode_subjects).transpose()?;
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let mut user = Users::update_many()
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(user_id));
        if let Some(ref first_name) = update.first_name {
            user = user.col_expr(users::Column::FirstName, Expr::value(first_name.clone()));
        }
        if let Some(ref last_name) = update.last_name {
            user = user.col_expr(users::Column::LastName, Expr::value(last_name.clone()));
        }
        if let Some(ref phone) = update.phone {
            user = user.col_expr(users::Column::Phone, Expr::value(phone.clone()));
        }
        if let Some(is_active) = update.is_active {
            user = user.col_expr(users::Column::IsActive, Expr::value(is_active));
        }
        if let Some(is_class_teacher) = update.is_class_teacher {
            let role = if is_class_teacher {
                UserRole::CLASS_TEACHER
            } else {
                UserRole::SUBJECT_TEACHER
            };
            user = user.col_expr(users::Column::Role, Expr::value(role));
        }
        user.exec(&txn).await.map_err(db_error("更新教师用户失败"))?;

        let mut model = existing.into_active_model();
        if let Some(employee_id) = update.employee_id {
            model.employee_id = Set(employee_id);
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(Some(qualification));
        }
        if let Some(subjects) = subjects {
            model.subjects = Set(subjects);
        }
        if let Some(experience_years) = update.experience_years {
            model.experience_years = Set(experience_years);
        }
        if let Some(is_class_teacher) = update.is_class_teacher {
            model.is_class_teacher = Set(is_class_teacher);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(now);

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("更新教师档案失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(self.teacher_items(vec![updated]).await?.pop())
    }

    /// 软删除教师及其账号
    pub async fn deactivate_teacher_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?
        else {
            return Ok(false);
        };

        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        Teachers::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("停用教师失败"))?;

        Users::update_many()
            .col_expr(users::Column::IsActive, Expr::value(false))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(existing.user_id))
            .exec(&txn)
            .await
            .map_err(db_error("停用教师用户失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(true)
    }

    pub async fn get_teacher_stats_impl(&self, school_id: i64) -> Result<TeacherStats> {
        let teachers = school_teachers(school_id)
            .all(&self.db)
            .await
            .map_err(db_error("查询教师失败"))?;

        let active: Vec<&TeacherModel> = teachers.iter().filter(|t| t.is_active).collect();
        let experience: Vec<f64> = active
            .iter()
            .map(|t| f64::from(t.experience_years))
            .collect();

        Ok(TeacherStats {
            total_teachers: teachers.len() as i64,
            active_teachers: active.len() as i64,
            class_teachers: active.iter().filter(|t| t.is_class_teacher).count() as i64,
            average_experience: round2(average(&experience)),
        })
    }
}
