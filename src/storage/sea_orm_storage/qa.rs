//! 家长与班主任问答存储操作

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::prelude::{QaMessageModel, QaMessages};
use crate::entity::qa_messages::{ActiveModel, Column};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse,
    qa::{
        entities::QaStatus,
        requests::{NewQaMessage, QaListQuery},
        responses::QaView,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub(crate) async fn qa_views(&self, models: Vec<QaMessageModel>) -> Result<Vec<QaView>> {
        let users = self
            .user_briefs(
                models
                    .iter()
                    .flat_map(|m| [m.parent_id, m.class_teacher_id]),
            )
            .await?;
        let students = self
            .student_briefs(models.iter().map(|m| m.student_id))
            .await?;

        Ok(models
            .into_iter()
            .map(|m| QaView {
                parent: users.get(&m.parent_id).cloned(),
                class_teacher: users.get(&m.class_teacher_id).cloned(),
                student: students.get(&m.student_id).cloned(),
                message: m.into_message(),
            })
            .collect())
    }

    async fn qa_view(&self, model: QaMessageModel) -> Result<QaView> {
        self.qa_views(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("问答读取失败"))
    }

    async fn find_qa(&self, id: i64) -> Result<Option<QaMessageModel>> {
        QaMessages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询问答失败"))
    }

    /// 家长发起问答
    pub async fn create_qa_impl(&self, qa: NewQaMessage) -> Result<QaView> {
        let now = now_ts();

        let model = ActiveModel {
            parent_id: Set(qa.parent_id),
            class_teacher_id: Set(qa.class_teacher_id),
            student_id: Set(qa.student_id),
            message: Set(qa.message),
            reply: Set(None),
            status: Set(QaStatus::Pending.as_str().to_string()),
            priority: Set(qa.priority.as_str().to_string()),
            replied_at: Set(None),
            closed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("创建问答失败"))?;

        self.qa_view(model).await
    }

    pub async fn get_qa_impl(&self, scope: AccessScope, id: i64) -> Result<Option<QaView>> {
        let Some(model) = QaMessages::find_by_id(id)
            .filter(scope::qa_condition(&scope))
            .one(&self.db)
            .await
            .map_err(db_error("查询问答失败"))?
        else {
            return Ok(None);
        };

        Ok(Some(self.qa_view(model).await?))
    }

    /// 分页列出可见的问答，最新在前
    pub async fn list_qa_impl(
        &self,
        scope: AccessScope,
        query: QaListQuery,
    ) -> Result<PaginatedResponse<QaView>> {
        let mut select = QaMessages::find().filter(scope::qa_condition(&scope));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询问答列表失败").await?;

        Ok(PaginatedResponse {
            items: self.qa_views(models).await?,
            pagination,
        })
    }

    /// 班主任回复，状态变为已回复
    pub async fn reply_qa_impl(&self, id: i64, reply: String) -> Result<Option<QaView>> {
        let Some(existing) = self.find_qa(id).await? else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model = existing.into_active_model();
        model.reply = Set(Some(reply));
        model.status = Set(QaStatus::Replied.as_str().to_string());
        model.replied_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("回复问答失败"))?;

        Ok(Some(self.qa_view(updated).await?))
    }

    pub async fn update_qa_status_impl(
        &self,
        id: i64,
        status: QaStatus,
    ) -> Result<Option<QaView>> {
        let Some(existing) = self.find_qa(id).await? else {
            return Ok(None);
        };

        let now = now_ts();
        let mut model = existing.into_active_model();
        model.status = Set(status.as_str().to_string());
        model.closed_at = Set((status == QaStatus::Closed).then_some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新问答状态失败"))?;

        Ok(Some(self.qa_view(updated).await?))
    }

    pub async fn delete_qa_impl(&self, id: i64) -> Result<bool> {
        let result = QaMessages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除问答失败"))?;

        Ok(result.rows_affected > 0)
    }
}
