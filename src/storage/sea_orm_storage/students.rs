//! 学生存储操作
//!
//! 学生由一条用户记录和一条档案记录组成，创建、更新和停用都在同一事务内完成。

use super::{SeaOrmStorage, db_error, fetch_page, like_keyword, now_ts, scope, search_keyword};
use crate::entity::prelude::{Classes, StudentModel, Students, Users};
use crate::entity::students::{ActiveModel, Column};
use crate::entity::{classes, users};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse,
    classes::entities::ClassBrief,
    students::{
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListItem,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 组装学生列表项（用户、班级、家长）
    pub(crate) async fn student_items(
        &self,
        models: Vec<StudentModel>,
    ) -> Result<Vec<StudentListItem>> {
        let users = self
            .user_models(
                models
                    .iter()
                    .flat_map(|s| std::iter::once(s.user_id).chain(s.parent_id)),
            )
            .await?;
        let classes = self.class_briefs(models.iter().map(|s| s.class_id)).await?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let user = users.get(&m.user_id)?.brief();
                let class = classes.get(&m.class_id).cloned().unwrap_or(ClassBrief {
                    id: m.class_id,
                    name: String::new(),
                    section: String::new(),
                });
                let parent = m
                    .parent_id
                    .and_then(|id| users.get(&id))
                    .map(|p| p.brief());

                Some(StudentListItem {
                    student: m.into_student(),
                    user,
                    class,
                    parent,
                })
            })
            .collect())
    }

    /// 在给定连接上写入用户与学生档案
    async fn insert_student<C>(conn: &C, student: NewStudent, now: i64) -> Result<StudentModel>
    where
        C: ConnectionTrait,
    {
        let user = Self::user_active_model(student.user, now)
            .insert(conn)
            .await
            .map_err(db_error("创建学生用户失败"))?;

        ActiveModel {
            user_id: Set(user.id),
            class_id: Set(student.class_id),
            parent_id: Set(student.parent_id),
            roll_number: Set(student.roll_number),
            admission_number: Set(student.admission_number),
            admission_date: Set(student.admission_date),
            father_name: Set(student.father_name),
            mother_name: Set(student.mother_name),
            father_phone: Set(student.father_phone),
            mother_phone: Set(student.mother_phone),
            blood_group: Set(student.blood_group),
            emergency_contact: Set(student.emergency_contact),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(db_error("创建学生档案失败"))
    }

    /// 创建学生
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<StudentListItem> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;
        let model = Self::insert_student(&txn, student, now_ts()).await?;
        txn.commit().await.map_err(db_error("提交事务失败"))?;

        let mut items = self.student_items(vec![model]).await?;
        items
            .pop()
            .ok_or_else(|| SchoolError::database_operation("学生创建后读取失败"))
    }

    /// 批量创建学生，任一失败整体回滚
    pub async fn create_students_bulk_impl(
        &self,
        students: Vec<NewStudent>,
    ) -> Result<Vec<StudentListItem>> {
        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let mut models = Vec::with_capacity(students.len());
        for student in students {
            models.push(Self::insert_student(&txn, student, now).await?);
        }

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        self.student_items(models).await
    }

    pub async fn get_student_impl(
        &self,
        scope: AccessScope,
        id: i64,
    ) -> Result<Option<StudentListItem>> {
        let Some(model) = Students::find_by_id(id)
            .filter(Column::Id.in_subquery(scope::student_ids(&scope)))
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?
        else {
            return Ok(None);
        };

        Ok(self.student_items(vec![model]).await?.pop())
    }

    pub async fn get_student_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentListItem>> {
        let Some(model) = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?
        else {
            return Ok(None);
        };

        Ok(self.student_items(vec![model]).await?.pop())
    }

    /// 分页列出学生，支持按学号或姓名搜索
    pub async fn list_students_impl(
        &self,
        scope: AccessScope,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<StudentListItem>> {
        let mut select = Students::find().filter(Column::Id.in_subquery(scope::student_ids(&scope)));

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
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
                    .add(Column::RollNumber.like(like_keyword(keyword)))
                    .add(Column::AdmissionNumber.like(like_keyword(keyword)))
                    .add(Column::UserId.in_subquery(matching_users)),
            );
        }

        let select = select
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::RollNumber);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询学生列表失败").await?;

        Ok(PaginatedResponse {
            items: self.student_items(models).await?,
            pagination,
        })
    }

    /// 范围内全部有效学生
    pub async fn scoped_students_impl(&self, scope: AccessScope) -> Result<Vec<StudentListItem>> {
        let models = Students::find()
            .filter(Column::Id.in_subquery(scope::student_ids(&scope)))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::RollNumber)
            .all(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;

        self.student_items(models).await
    }

    pub async fn students_of_class_impl(&self, class_id: i64) -> Result<Vec<StudentListItem>> {
        let models = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::RollNumber)
            .all(&self.db)
            .await
            .map_err(db_error("查询班级学生失败"))?;

        self.student_items(models).await
    }

    /// 最近入学的学生
    pub async fn recent_students_impl(
        &self,
        school_id: i64,
        limit: u64,
    ) -> Result<Vec<StudentListItem>> {
        let school_classes = Classes::find()
            .select_only()
            .column(classes::Column::Id)
            .filter(classes::Column::SchoolId.eq(school_id))
            .into_query();

        let models = Students::find()
            .filter(Column::ClassId.in_subquery(school_classes))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;

        self.student_items(models).await
    }

    /// 更新学生档案，姓名电话等写回用户表
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentListItem>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        if update.first_name.is_some()
            || update.last_name.is_some()
            || update.phone.is_some()
            || update.is_active.is_some()
        {
            let mut user = Users::update_many()
                .col_expr(users::Column::UpdatedAt, Expr::value(now))
                .filter(users::Column::Id.eq(existing.user_id));
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
            user.exec(&txn).await.map_err(db_error("更新学生用户失败"))?;
        }

        let mut model = existing.into_active_model();
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(parent_id) = update.parent_id {
            model.parent_id = Set(Some(parent_id));
        }
        if let Some(roll_number) = update.roll_number {
            model.roll_number = Set(roll_number);
        }
        if let Some(father_name) = update.father_name {
            model.father_name = Set(Some(father_name));
        }
        if let Some(mother_name) = update.mother_name {
            model.mother_name = Set(Some(mother_name));
        }
        if let Some(father_phone) = update.father_phone {
            model.father_phone = Set(Some(father_phone));
        }
        if let Some(mother_phone) = update.mother_phone {
            model.mother_phone = Set(Some(mother_phone));
        }
        if let Some(blood_group) = update.blood_group {
            model.blood_group = Set(Some(blood_group));
        }
        if let Some(emergency_contact) = update.emergency_contact {
            model.emergency_contact = Set(Some(emergency_contact));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(now);

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("更新学生档案失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(self.student_items(vec![updated]).await?.pop())
    }

    /// 软删除学生及其账号
    pub async fn deactivate_student_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?
        else {
            return Ok(false);
        };

        let now = now_ts();
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        Students::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("停用学生失败"))?;

        Users::update_many()
            .col_expr(users::Column::IsActive, Expr::value(false))
            .col_expr(users::Column::UpdatedAt, Expr::value(now))
            .filter(users::Column::Id.eq(existing.user_id))
            .exec(&txn)
            .await
            .map_err(db_error("停用学生用户失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(true)
    }
}
