use super::{SeaOrmStorage, db_error, like_keyword, now_ts, search_keyword};
use crate::entity::prelude::{Subjects, Timetables};
use crate::entity::subjects::{ActiveModel, Column};
use crate::entity::timetables;
use crate::errors::Result;
use crate::models::subjects::{
    entities::{Subject, SubjectBrief},
    requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(
        &self,
        school_id: i64,
        req: CreateSubjectRequest,
    ) -> Result<Subject> {
        let now = now_ts();

        let model = ActiveModel {
            school_id: Set(school_id),
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            is_core: Set(req.is_core.unwrap_or(true)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建科目失败"))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_impl(&self, school_id: i64, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目（不分页，按名称排序）
    pub async fn list_subjects_impl(
        &self,
        school_id: i64,
        query: SubjectListQuery,
    ) -> Result<Vec<Subject>> {
        let mut select = Subjects::find().filter(Column::SchoolId.eq(school_id));

        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }
        if let Some(keyword) = search_keyword(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(like_keyword(keyword)))
                    .add(Column::Code.like(like_keyword(keyword))),
            );
        }

        let models = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询科目列表失败"))?;

        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn subject_code_exists_impl(
        &self,
        school_id: i64,
        code: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Subjects::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::Code.eq(code));

        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?;

        Ok(count > 0)
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(is_core) = update.is_core {
            model.is_core = Set(is_core);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新科目失败"))?;

        Ok(Some(updated.into_subject()))
    }

    pub async fn deactivate_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("停用科目失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 教师在有效课表中任教的科目
    pub async fn subjects_taught_by_impl(
        &self,
        school_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<SubjectBrief>> {
        let taught = Timetables::find()
            .select_only()
            .column(timetables::Column::SubjectId)
            .filter(timetables::Column::SchoolId.eq(school_id))
            .filter(timetables::Column::TeacherId.eq(teacher_id))
            .filter(timetables::Column::IsActive.eq(true))
            .into_query();

        let models = Subjects::find()
            .filter(Column::Id.in_subquery(taught))
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error("查询教师科目失败"))?;

        Ok(models
            .into_iter()
            .map(|m| SubjectBrief {
                id: m.id,
                name: m.name,
                code: m.code,
            })
            .collect())
    }
}
