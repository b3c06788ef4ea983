//! 出勤存储操作

use std::collections::HashSet;

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::attendance::{ActiveModel, Column};
use crate::entity::prelude::{Attendance, AttendanceModel, Students};
use crate::entity::students;
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse, PaginationQuery, ScopeKind,
    analytics::facts::{AttendanceFact, FactFilter},
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{AttendanceEntry, AttendanceListQuery, UpdateAttendanceRequest},
        responses::{AttendanceSummary, AttendanceView},
    },
};
use crate::utils::metrics::attendance_summary;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::warn;

/// 按访问范围过滤的出勤查询
fn scoped(scope: &AccessScope) -> Select<Attendance> {
    let select = Attendance::find().filter(Column::ClassId.in_subquery(scope::class_ids(scope)));
    match scope.kind {
        ScopeKind::Parent(_) | ScopeKind::Student(_) => {
            select.filter(Column::StudentId.in_subquery(scope::student_ids(scope)))
        }
        _ => select,
    }
}

fn apply_filter(mut select: Select<Attendance>, filter: &FactFilter) -> Select<Attendance> {
    if let Some(range) = filter.range {
        select = select
            .filter(Column::Date.gte(range.start))
            .filter(Column::Date.lte(range.end));
    }
    if let Some(class_id) = filter.class_id {
        select = select.filter(Column::ClassId.eq(class_id));
    }
    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    select
}

/// 单日优先，否则按起止日期过滤
fn apply_dates(mut select: Select<Attendance>, query: &AttendanceListQuery) -> Select<Attendance> {
    if let Some(date) = query.date {
        return select.filter(Column::Date.eq(date));
    }
    if let Some(start) = query.start_date {
        select = select.filter(Column::Date.gte(start));
    }
    if let Some(end) = query.end_date {
        select = select.filter(Column::Date.lte(end));
    }
    select
}

fn newest_first(select: Select<Attendance>) -> Select<Attendance> {
    select.order_by_desc(Column::Date).order_by_asc(Column::Id)
}

impl SeaOrmStorage {
    pub(crate) async fn attendance_views(
        &self,
        models: Vec<AttendanceModel>,
    ) -> Result<Vec<AttendanceView>> {
        let students = self
            .student_briefs(models.iter().map(|a| a.student_id))
            .await?;
        let markers = self.user_briefs(models.iter().map(|a| a.marked_by)).await?;

        Ok(models
            .into_iter()
            .map(|m| AttendanceView {
                student: students.get(&m.student_id).cloned(),
                marker: markers.get(&m.marked_by).cloned(),
                record: m.into_record(),
            })
            .collect())
    }

    /// 按班级批量点名，同一班级同一天只能点名一次
    pub async fn mark_attendance_impl(
        &self,
        class_id: i64,
        date: NaiveDate,
        marked_by: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<i64> {
        let student_ids: HashSet<i64> = records.iter().map(|r| r.student_id).collect();
        if student_ids.len() != records.len() {
            return Err(SchoolError::bad_request("Duplicate student in records"));
        }

        let txn = self.db.begin().await.map_err(db_error("开启事务失败"))?;

        let existing = Attendance::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(date))
            .count(&txn)
            .await
            .map_err(db_error("查询出勤失败"))?;
        if existing > 0 {
            return Err(SchoolError::conflict(
                "Attendance already marked for this class on this date",
            ));
        }

        let enrolled = Students::find()
            .filter(students::Column::Id.is_in(student_ids.iter().copied()))
            .filter(students::Column::ClassId.eq(class_id))
            .count(&txn)
            .await
            .map_err(db_error("查询班级学生失败"))?;
        if enrolled as usize != student_ids.len() {
            return Err(SchoolError::bad_request(
                "Some students do not belong to this class",
            ));
        }

        let now = now_ts();
        let count = records.len() as i64;
        let models = records.into_iter().map(|r| ActiveModel {
            student_id: Set(r.student_id),
            class_id: Set(class_id),
            date: Set(date),
            status: Set(r.status.to_string()),
            marked_by: Set(marked_by),
            remarks: Set(r.remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });

        Attendance::insert_many(models)
            .exec(&txn)
            .await
            .map_err(db_error("写入出勤失败"))?;

        txn.commit().await.map_err(db_error("提交事务失败"))?;

        Ok(count)
    }

    pub async fn get_attendance_impl(
        &self,
        scope: AccessScope,
        id: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let result = scoped(&scope)
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(db_error("查询出勤失败"))?;

        Ok(result.map(|m| m.into_record()))
    }

    /// 班级出勤（按日期或区间）
    pub async fn list_class_attendance_impl(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<AttendanceView>> {
        let select = apply_dates(Attendance::find().filter(Column::ClassId.eq(class_id)), &query);

        let (models, pagination) = fetch_page(
            &self.db,
            newest_first(select),
            &query.pagination,
            "查询班级出勤失败",
        )
        .await?;

        Ok(PaginatedResponse {
            items: self.attendance_views(models).await?,
            pagination,
        })
    }

    /// 学生出勤记录及区间汇总
    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
        query: AttendanceListQuery,
    ) -> Result<(PaginatedResponse<AttendanceView>, AttendanceSummary)> {
        let select = apply_dates(
            Attendance::find().filter(Column::StudentId.eq(student_id)),
            &query,
        );

        let statuses: Vec<String> = select
            .clone()
            .select_only()
            .column(Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("统计学生出勤失败"))?;
        let summary = attendance_summary(
            statuses
                .iter()
                .filter_map(|s| s.parse::<AttendanceStatus>().ok()),
        );

        let (models, pagination) = fetch_page(
            &self.db,
            newest_first(select),
            &query.pagination,
            "查询学生出勤失败",
        )
        .await?;

        Ok((
            PaginatedResponse {
                items: self.attendance_views(models).await?,
                pagination,
            },
            summary,
        ))
    }

    /// 修改状态或备注
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let Some(existing) = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("查询出勤失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(Some(remarks));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("更新出勤失败"))?;

        Ok(Some(updated.into_record()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendance::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("删除出勤失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 范围内的出勤事实行，附带班级与学生名称
    pub async fn attendance_facts_impl(
        &self,
        scope: AccessScope,
        filter: FactFilter,
    ) -> Result<Vec<AttendanceFact>> {
        let models = apply_filter(scoped(&scope), &filter)
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error("查询出勤统计失败"))?;

        let classes = self.class_models(models.iter().map(|a| a.class_id)).await?;
        let students = self
            .student_briefs(models.iter().map(|a| a.student_id))
            .await?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let Ok(status) = m.status.parse::<AttendanceStatus>() else {
                    warn!(
                        "Skipping attendance record {} with unknown status '{}'",
                        m.id, m.status
                    );
                    return None;
                };
                let class = classes.get(&m.class_id);
                let student = students.get(&m.student_id);
                Some(AttendanceFact {
                    record_id: m.id,
                    student_id: m.student_id,
                    class_id: m.class_id,
                    date: m.date,
                    status,
                    marked_by: m.marked_by,
                    class_name: class.map(|c| c.name.clone()).unwrap_or_default(),
                    section: class.map(|c| c.section.clone()).unwrap_or_default(),
                    first_name: student.map(|s| s.first_name.clone()).unwrap_or_default(),
                    last_name: student.map(|s| s.last_name.clone()).unwrap_or_default(),
                    roll_number: student.map(|s| s.roll_number.clone()).unwrap_or_default(),
                })
            })
            .collect())
    }

    pub async fn attendance_page_impl(
        &self,
        scope: AccessScope,
        filter: FactFilter,
        pagination: PaginationQuery,
    ) -> Result<PaginatedResponse<AttendanceView>> {
        let select = newest_first(apply_filter(scoped(&scope), &filter));
        let (models, pagination) =
            fetch_page(&self.db, select, &pagination, "查询出勤记录失败").await?;

        Ok(PaginatedResponse {
            items: self.attendance_views(models).await?,
            pagination,
        })
    }

    /// 最近的点名记录
    pub async fn recent_attendance_impl(
        &self,
        scope: AccessScope,
        limit: u64,
    ) -> Result<Vec<AttendanceView>> {
        let models = scoped(&scope)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("查询出勤失败"))?;

        self.attendance_views(models).await
    }
}
