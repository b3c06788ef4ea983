//! 班级存储操作

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::classes::{ActiveModel, Column};
use crate::entity::prelude::{ClassModel, Classes, Students};
use crate::entity::students;
use crate::errors::Result;
use crate::models::{
    AccessScope, PaginatedResponse,
    classes::{
        entities::{Class, DEFAULT_MAX_STUDENTS},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::{ClassListItem, ClassStats},
    },
};
use crate::utils::metrics::{average, round2};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

/// 班级列表的默认排序：学年倒序，再按名称、班号
fn ordered(select: Select<Classes>) -> Select<Classes> {
    select
        .order_by_desc(Column::AcademicYear)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Section)
}

impl SeaOrmStorage {
    /// 附带班主任与人数
    pub(crate) async fn class_list_items(
        &self,
        models: Vec<ClassModel>,
    ) -> Result<Vec<ClassListItem>> {
        let teachers = self
            .user_briefs(models.iter().filter_map(|c| c.class_teacher_id))
            .await?;
        let counts = self.student_counts(models.iter().map(|c| c.id)).await?;

        Ok(models
            .into_iter()
            .map(|m| ClassListItem {
                class_teacher: m.class_teacher_id.and_then(|id| teachers.get(&id).cloned()),
                student_count: counts.get(&m.id).copied().unwrap_or(0),
                class: m.into_class(),
            })
            .collect())
    }

    /// 创建班级
    pub async fn create_class_impl(
        &self,
        school_id: i64,
        req: CreateClassRequest,
    ) -> Result<Class> {
        let now = now_ts();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            section: Set(req.section),
            academic_year: Set(req.academic_year),
            class_teacher_id: Set(req.class_teacher_id),
            max_students: Set(req.max_students.unwrap_or(DEFAULT_MAX_STUDENTS)),
            room_number: Set(req.room_number),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建班级失败"))?;

        Ok(result.into_class())
    }

    pub async fn get_class_impl(&self, school_id: i64, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 范围内的单个班级
    pub async fn get_class_item_impl(
        &self,
        scope: AccessScope,
        id: i64,
    ) -> Result<Option<ClassListItem>> {
        let Some(model) = Classes::find_by_id(id)
            .filter(Column::Id.in_subquery(scope::class_ids(&scope)))
            .one(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?
        else {
            return Ok(None);
        };

        Ok(self.class_list_items(vec![model]).await?.pop())
    }

    /// 分页列出班级
    pub async fn list_classes_impl(
        &self,
        scope: AccessScope,
        query: ClassListQuery,
    ) -> Result<PaginatedResponse<ClassListItem>> {
        let mut select = Classes::find().filter(Column::Id.in_subquery(scope::class_ids(&scope)));

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        let (models, pagination) =
            fetch_page(&self.db, ordered(select), &query.pagination, "查询班级列表失败").await?;

        Ok(PaginatedResponse {
            items: self.class_list_items(models).await?,
            pagination,
        })
    }

    /// 范围内全部有效班级
    pub async fn class_items_impl(&self, scope: AccessScope) -> Result<Vec<ClassListItem>> {
        let models = ordered(
            Classes::find()
                .filter(Column::Id.in_subquery(scope::class_ids(&scope)))
                .filter(Column::IsActive.eq(true)),
        )
        .all(&self.db)
        .await
        .map_err(db_error("查询班级列表失败"))?;

        self.class_list_items(models).await
    }

    pub async fn class_exists_impl(
        &self,
        school_id: i64,
        name: &str,
        section: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Classes::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::Name.eq(name))
            .filter(Column::Section.eq(section))
            .filter(Column::AcademicYear.eq(academic_year));

        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?;

        Ok(count > 0)
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let Some(existing) = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(section) = update.section {
            model.section = Set(section);
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(class_teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(Some(class_teacher_id));
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(max_students);
        }
        if let Some(room_number) = update.room_number {
            model.room_number = Set(Some(room_number));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新班级失败"))?;

        Ok(Some(updated.into_class()))
    }

    /// 班级下的学生数（包含已停用）
    pub async fn count_class_students_impl(&self, class_id: i64) -> Result<i64> {
        let count = Students::find()
            .filter(students::Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(db_error("统计班级学生失败"))?;

        Ok(count as i64)
    }

    /// 软删除班级
    pub async fn deactivate_class_impl(&self, id: i64) -> Result<bool> {
        let result = Classes::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("停用班级失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_class_stats_impl(&self, school_id: i64) -> Result<ClassStats> {
        let classes = Classes::find()
            .filter(Column::SchoolId.eq(school_id))
            .all(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?;

        let total_students = Students::find()
            .filter(students::Column::ClassId.is_in(classes.iter().map(|c| c.id)))
            .filter(students::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error("统计学生失败"))?;

        let capacities: Vec<f64> = classes
            .iter()
            .filter(|c| c.is_active)
            .map(|c| f64::from(c.max_students))
            .collect();

        Ok(ClassStats {
            total_classes: classes.len() as i64,
            active_classes: capacities.len() as i64,
            total_students: total_students as i64,
            classes_with_teachers: classes
                .iter()
                .filter(|c| c.class_teacher_id.is_some())
                .count() as i64,
            average_capacity: round2(average(&capacities)),
        })
    }
}
