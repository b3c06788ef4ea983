//! 通知存储操作
//!
//! 通知按接收者展开为多行；`recipient_type = all` 且无接收者的行对全校可见。

use std::collections::HashSet;

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::notifications::{ActiveModel, Column};
use crate::entity::prelude::{Notifications, Students, Users};
use crate::entity::{students, users};
use crate::errors::Result;
use crate::models::{
    AccessScope, PaginatedResponse,
    notifications::{
        entities::{ANNOUNCEMENT_TYPE, Notification, RecipientType},
        requests::{CreateNotificationRequest, NewNotification, NotificationListQuery},
    },
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 解析接收者用户 ID
    pub async fn resolve_recipients_impl(
        &self,
        school_id: i64,
        req: &CreateNotificationRequest,
    ) -> Result<Vec<i64>> {
        match req.recipient_type {
            RecipientType::All => {
                let ids: Vec<i64> = Users::find()
                    .select_only()
                    .column(users::Column::Id)
                    .filter(users::Column::SchoolId.eq(school_id))
                    .filter(users::Column::IsActive.eq(true))
                    .order_by_asc(users::Column::Id)
                    .into_tuple()
                    .all(&self.db)
                    .await
                    .map_err(db_error("查询接收者失败"))?;
                Ok(ids)
            }
            RecipientType::Class => {
                let Some(class_id) = req.recipient_class_id else {
                    return Ok(Vec::new());
                };
                let rows: Vec<(i64, Option<i64>)> = Students::find()
                    .select_only()
                    .column(students::Column::UserId)
                    .column(students::Column::ParentId)
                    .filter(students::Column::ClassId.eq(class_id))
                    .filter(
                        students::Column::ClassId
                            .in_subquery(scope::class_ids(&AccessScope::school(school_id))),
                    )
                    .filter(students::Column::IsActive.eq(true))
                    .into_tuple()
                    .all(&self.db)
                    .await
                    .map_err(db_error("查询班级接收者失败"))?;

                // 学生与家长，去重并保持顺序
                let mut seen = HashSet::new();
                Ok(rows
                    .into_iter()
                    .flat_map(|(user_id, parent_id)| std::iter::once(user_id).chain(parent_id))
                    .filter(|id| seen.insert(*id))
                    .collect())
            }
            RecipientType::Parent | RecipientType::Teacher | RecipientType::Student => {
                let Some(recipient_id) = req.recipient_id else {
                    return Ok(Vec::new());
                };
                let count = Users::find_by_id(recipient_id)
                    .filter(users::Column::SchoolId.eq(school_id))
                    .count(&self.db)
                    .await
                    .map_err(db_error("查询接收者失败"))?;
                Ok(if count > 0 { vec![recipient_id] } else { Vec::new() })
            }
        }
    }

    /// 批量写入通知
    pub async fn create_notifications_impl(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<i64> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let now = now_ts();
        let count = notifications.len() as i64;
        let models = notifications.into_iter().map(|n| ActiveModel {
            school_id: Set(n.school_id),
            sender_id: Set(n.sender_id),
            recipient_id: Set(n.recipient_id),
            recipient_type: Set(n.recipient_type.as_str().to_string()),
            recipient_class_id: Set(n.recipient_class_id),
            title: Set(n.title),
            message: Set(n.message),
            notification_type: Set(n.notification_type),
            priority: Set(n.priority.as_str().to_string()),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        });

        Notifications::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_error("创建通知失败"))?;

        Ok(count)
    }

    /// 当前用户可见的通知
    pub async fn list_notifications_impl(
        &self,
        school_id: i64,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>> {
        let mut select = Notifications::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(
                Condition::any().add(Column::RecipientId.eq(user_id)).add(
                    Condition::all()
                        .add(Column::RecipientType.eq(RecipientType::All.as_str()))
                        .add(Column::RecipientId.is_null()),
                ),
            );

        if let Some(ref notification_type) = query.notification_type {
            select = select.filter(Column::NotificationType.eq(notification_type));
        }
        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.as_str()));
        }
        if let Some(is_read) = query.is_read {
            select = select.filter(Column::IsRead.eq(is_read));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询通知列表失败").await?;

        Ok(PaginatedResponse {
            items: models.into_iter().map(|m| m.into_notification()).collect(),
            pagination,
        })
    }

    pub async fn get_notification_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询通知失败"))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 标记已读
    pub async fn mark_notification_read_impl(&self, id: i64) -> Result<Option<Notification>> {
        Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .col_expr(Column::ReadAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("更新通知失败"))?;

        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询通知失败"))?;

        Ok(result.map(|m| m.into_notification()))
    }

    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除通知失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 指定时间之后的全校通知
    pub async fn notifications_since_impl(
        &self,
        school_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Notification>> {
        let models = Notifications::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::CreatedAt.gte(since.timestamp()))
            .all(&self.db)
            .await
            .map_err(db_error("统计通知失败"))?;

        Ok(models.into_iter().map(|m| m.into_notification()).collect())
    }

    /// 全校或指定班级的公告；同一次发送展开的多行只保留一条
    pub async fn announcements_impl(
        &self,
        school_id: i64,
        class_ids: Vec<i64>,
        limit: u64,
    ) -> Result<Vec<Notification>> {
        let mut audience =
            Condition::any().add(Column::RecipientType.eq(RecipientType::All.as_str()));
        if !class_ids.is_empty() {
            audience = audience.add(Column::RecipientClassId.is_in(class_ids));
        }

        let models = Notifications::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::NotificationType.eq(ANNOUNCEMENT_TYPE))
            .filter(audience)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("查询公告失败"))?;

        let mut seen = HashSet::new();
        Ok(models
            .into_iter()
            .filter(|m| seen.insert((m.sender_id, m.title.clone(), m.created_at)))
            .take(limit as usize)
            .map(|m| m.into_notification())
            .collect())
    }
}
