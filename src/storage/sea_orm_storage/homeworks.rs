//! 作业存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::homework_submissions;
use crate::entity::homeworks::{ActiveModel, Column};
use crate::entity::prelude::{HomeworkModel, HomeworkSubmissions, Homeworks};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse,
    analytics::{facts::HomeworkFact, requests::DateRange},
    homework::{
        entities::{HomeworkSubmission, SubmissionStatus},
        requests::{HomeworkListQuery, NewHomework, UpdateHomeworkRequest},
        responses::HomeworkView,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};

fn scoped(scope: &AccessScope) -> Select<Homeworks> {
    Homeworks::find()
        .filter(Column::SchoolId.eq(scope.school_id))
        .filter(Column::ClassId.in_subquery(scope::class_ids(scope)))
}

/// 日期区间转为 unix 秒的半开区间
fn range_bounds(range: DateRange) -> (i64, i64) {
    let start = range.start.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = range.end.succ_opt().unwrap_or(range.end).and_hms_opt(0, 0, 0).unwrap_or_default();
    (start.and_utc().timestamp(), end.and_utc().timestamp())
}

impl SeaOrmStorage {
    pub(crate) async fn homework_views(
        &self,
        models: Vec<HomeworkModel>,
    ) -> Result<Vec<HomeworkView>> {
        let classes = self.class_briefs(models.iter().map(|h| h.class_id)).await?;
        let subjects = self
            .subject_briefs(models.iter().map(|h| h.subject_id))
            .await?;
        let teachers = self.user_briefs(models.iter().map(|h| h.teacher_id)).await?;
        let counts = self.submission_counts(models.iter().map(|h| h.id)).await?;

        Ok(models
            .into_iter()
            .map(|m| HomeworkView {
                class: classes.get(&m.class_id).cloned(),
                subject: subjects.get(&m.subject_id).cloned(),
                teacher: teachers.get(&m.teacher_id).cloned(),
                submission_count: counts.get(&m.id).copied().unwrap_or(0),
                homework: m.into_homework(),
            })
            .collect())
    }

    async fn homework_view(&self, model: HomeworkModel) -> Result<HomeworkView> {
        self.homework_views(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("作业读取失败"))
    }

    /// 创建作业
    pub async fn create_homework_impl(&self, homework: NewHomework) -> Result<HomeworkView> {
        let now = now_ts();
        let req = homework.request;

        let model = ActiveModel {
            school_id: Set(homework.school_id),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(homework.teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            instructions: Set(req.instructions),
            due_date: Set(req.due_date.timestamp()),
            max_marks: Set(req.max_marks),
            is_published: Set(req.is_published.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("创建作业失败"))?;

        self.homework_view(model).await
    }

    pub async fn get_homework_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<HomeworkView>> {
        let Some(model) = Homeworks::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询作业失败"))?
        else {
            return Ok(None);
        };

        Ok(Some(self.homework_view(model).await?))
    }

    /// 分页列出范围内的作业
    pub async fn list_homework_impl(
        &self,
        scope: AccessScope,
        query: HomeworkListQuery,
    ) -> Result<PaginatedResponse<HomeworkView>> {
        let mut select = scoped(&scope);

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        let select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询作业列表失败").await?;

        Ok(PaginatedResponse {
            items: self.homework_views(models).await?,
            pagination,
        })
    }

    /// 更新作业
    pub async fn update_homework_impl(
        &self,
        id: i64,
        update: UpdateHomeworkRequest,
    ) -> Result<Option<HomeworkView>> {
        let Some(existing) = Homeworks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询作业失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(max_marks) = update.max_marks {
            model.max_marks = Set(Some(max_marks));
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新作业失败"))?;

        Ok(Some(self.homework_view(updated).await?))
    }

    /// 删除作业及其提交
    pub async fn delete_homework_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        HomeworkSubmissions::delete_many()
            .filter(homework_submissions::Column::HomeworkId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error("删除作业提交失败"))?;

        let result = Homeworks::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error("删除作业失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 作业事实行：提交数与已评分分数
    pub async fn homework_facts_impl(
        &self,
        scope: AccessScope,
        class_id: Option<i64>,
        teacher_id: Option<i64>,
        created_in: Option<DateRange>,
    ) -> Result<Vec<HomeworkFact>> {
        let mut select = scoped(&scope);
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(range) = created_in {
            let (start, end) = range_bounds(range);
            select = select
                .filter(Column::CreatedAt.gte(start))
                .filter(Column::CreatedAt.lt(end));
        }

        let models = select
            .all(&self.db)
            .await
            .map_err(db_error("查询作业统计失败"))?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let submissions: Vec<(i64, Option<f64>)> = HomeworkSubmissions::find()
            .select_only()
            .column(homework_submissions::Column::HomeworkId)
            .column(homework_submissions::Column::Marks)
            .filter(homework_submissions::Column::HomeworkId.is_in(models.iter().map(|h| h.id)))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("查询作业提交失败"))?;

        let mut by_homework: HashMap<i64, (i64, Vec<f64>)> = HashMap::new();
        for (homework_id, marks) in submissions {
            let entry = by_homework.entry(homework_id).or_default();
            entry.0 += 1;
            entry.1.extend(marks);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let (submission_count, marks) = by_homework.remove(&m.id).unwrap_or_default();
                let homework = m.into_homework();
                HomeworkFact {
                    homework_id: homework.id,
                    class_id: homework.class_id,
                    teacher_id: homework.teacher_id,
                    is_published: homework.is_published,
                    due_date: homework.due_date,
                    created_at: homework.created_at,
                    submission_count,
                    marks,
                }
            })
            .collect())
    }

    /// 已发布且未到期的作业，按截止时间排序
    pub async fn pending_homework_impl(
        &self,
        scope: AccessScope,
        teacher_id: Option<i64>,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<HomeworkView>> {
        let mut select = scoped(&scope)
            .filter(Column::IsPublished.eq(true))
            .filter(Column::DueDate.gte(now.timestamp()));
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let models = select
            .order_by_asc(Column::DueDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询待完成作业失败"))?;

        self.homework_views(models).await
    }

    /// 学生提交作业，每份作业只能提交一次
    pub async fn create_submission_impl(
        &self,
        homework_id: i64,
        student_id: i64,
        content: Option<String>,
        status: SubmissionStatus,
    ) -> Result<HomeworkSubmission> {
        let model = homework_submissions::ActiveModel {
            homework_id: Set(homework_id),
            student_id: Set(student_id),
            content: Set(content),
            status: Set(status.to_string()),
            marks: Set(None),
            feedback: Set(None),
            submitted_at: Set(now_ts()),
            graded_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("提交作业失败"))?;

        Ok(model.into_submission())
    }

    pub async fn submissions_of_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<HomeworkSubmission>> {
        let models = HomeworkSubmissions::find()
            .filter(homework_submissions::Column::StudentId.eq(student_id))
            .order_by_desc(homework_submissions::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(db_error("查询作业提交失败"))?;

        Ok(models.into_iter().map(|m| m.into_submission()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_range_bounds_cover_whole_end_day() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let (start, end) = range_bounds(range);
        assert_eq!(end - start, 86_400);
    }
}
