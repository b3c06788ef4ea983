//! 投诉存储操作

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::complaints::{ActiveModel, Column};
use crate::entity::prelude::{ComplaintModel, Complaints};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse,
    complaints::{
        entities::ComplaintStatus,
        requests::{ComplaintListQuery, NewComplaint, UpdateComplaintRequest},
        responses::ComplaintView,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub(crate) async fn complaint_views(
        &self,
        models: Vec<ComplaintModel>,
    ) -> Result<Vec<ComplaintView>> {
        let users = self
            .user_briefs(
                models
                    .iter()
                    .flat_map(|m| std::iter::once(m.complainant_id).chain(m.class_teacher_id)),
            )
            .await?;
        let students = self
            .student_briefs(models.iter().map(|m| m.student_id))
            .await?;

        Ok(models
            .into_iter()
            .map(|m| ComplaintView {
                student: students.get(&m.student_id).cloned(),
                complainant: users.get(&m.complainant_id).cloned(),
                class_teacher: m.class_teacher_id.and_then(|id| users.get(&id).cloned()),
                complaint: m.into_complaint(),
            })
            .collect())
    }

    async fn complaint_view(&self, model: ComplaintModel) -> Result<ComplaintView> {
        self.complaint_views(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("投诉读取失败"))
    }

    async fn find_complaint(&self, id: i64) -> Result<Option<ComplaintModel>> {
        Complaints::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询投诉失败"))
    }

    /// 提交投诉
    pub async fn create_complaint_impl(&self, complaint: NewComplaint) -> Result<ComplaintView> {
        let now = now_ts();

        let model = ActiveModel {
            student_id: Set(complaint.student_id),
            complainant_id: Set(complaint.complainant_id),
            class_teacher_id: Set(complaint.class_teacher_id),
            subject: Set(complaint.subject),
            description: Set(complaint.description),
            category: Set(complaint.category),
            status: Set(ComplaintStatus::Open.as_str().to_string()),
            priority: Set(complaint.priority.as_str().to_string()),
            resolution: Set(None),
            resolved_by: Set(None),
            resolved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("创建投诉失败"))?;

        self.complaint_view(model).await
    }

    pub async fn get_complaint_impl(
        &self,
        scope: AccessScope,
        id: i64,
    ) -> Result<Option<ComplaintView>> {
        let Some(model) = Complaints::find_by_id(id)
            .filter(scope::complaint_condition(&scope))
            .one(&self.db)
            .await
            .map_err(db_error("查询投诉失败"))?
        else {
            return Ok(None);
        };

        Ok(Some(self.complaint_view(model).await?))
    }

    pub async fn list_complaints_impl(
        &self,
        scope: AccessScope,
        query: ComplaintListQuery,
    ) -> Result<PaginatedResponse<ComplaintView>> {
        let mut select = Complaints::find().filter(scope::complaint_condition(&scope));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category));
        }
        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.as_str()));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询投诉列表失败").await?;

        Ok(PaginatedResponse {
            items: self.complaint_views(models).await?,
            pagination,
        })
    }

    /// 更新状态、优先级或分类
    pub async fn update_complaint_impl(
        &self,
        id: i64,
        update: UpdateComplaintRequest,
    ) -> Result<Option<ComplaintView>> {
        let Some(existing) = self.find_complaint(id).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(status) = update.status {
            model.status = Set(status.as_str().to_string());
        }
        if let Some(priority) = update.priority {
            model.priority = Set(priority.as_str().to_string());
        }
        if let Some(category) = update.category {
            model.category = Set(category);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新投诉失败"))?;

        Ok(Some(self.complaint_view(updated).await?))
    }

    /// 结案：记录处理结果与处理人
    pub async fn resolve_complaint_impl(
        &self,
        id: i64,
        resolver_id: i64,
        resolution: String,
    ) -> Result<Option<ComplaintView>> {
        let Some(existing) = self.find_complaint(id).await? else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model = existing.into_active_model();
        model.status = Set(ComplaintStatus::Resolved.as_str().to_string());
        model.resolution = Set(Some(resolution));
        model.resolved_by = Set(Some(resolver_id));
        model.resolved_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("处理投诉失败"))?;

        Ok(Some(self.complaint_view(updated).await?))
    }

    pub async fn delete_complaint_impl(&self, id: i64) -> Result<bool> {
        let result = Complaints::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除投诉失败"))?;

        Ok(result.rows_affected > 0)
    }
}
