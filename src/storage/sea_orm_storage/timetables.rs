//! 课表存储操作
//!
//! 新建与更新在可串行化事务中检查班级时段和教师时段冲突。
//! SQLite 的写事务本身是串行的，直接使用普通事务。

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, db_error, now_ts, scope};
use crate::entity::prelude::{TimetableModel, Timetables};
use crate::entity::timetables::{ActiveModel, Column};
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope,
    timetable::{
        entities::{TimetableEntry, WEEK_ORDER, day_name},
        requests::{TimetableListQuery, TimetableSlot},
        responses::{DayCount, TimetableEntryView, TimetableStats},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, IntoActiveModel, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

pub(crate) const CLASS_SLOT_CONFLICT: &str =
    "A timetable entry already exists for this class, day, and period";
pub(crate) const TEACHER_SLOT_CONFLICT: &str =
    "Teacher is already assigned to another class at this time";
const CONCURRENT_UPDATE: &str = "Timetable was modified concurrently, please retry";

/// 并发写入导致的串行化失败
fn is_serialization_failure(e: &DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("40001") || msg.contains("could not serialize") || msg.contains("database is locked")
}

/// 串行化失败映射为冲突，其余按普通数据库错误处理
fn txn_error(context: &'static str) -> impl Fn(DbErr) -> SchoolError {
    move |e| {
        if is_serialization_failure(&e) {
            SchoolError::conflict(CONCURRENT_UPDATE)
        } else {
            db_error(context)(e)
        }
    }
}

impl SeaOrmStorage {
    async fn begin_serializable(&self) -> Result<DatabaseTransaction> {
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(Some(IsolationLevel::Serializable), None)
                    .await
            }
        };
        txn.map_err(txn_error("开启事务失败"))
    }

    /// 检查班级时段与教师时段冲突
    async fn check_slot_conflicts(
        txn: &DatabaseTransaction,
        school_id: i64,
        slot: &TimetableSlot,
        exclude_id: Option<i64>,
        check_teacher: bool,
    ) -> Result<()> {
        let same_slot = || {
            let select = Timetables::find()
                .filter(Column::SchoolId.eq(school_id))
                .filter(Column::DayOfWeek.eq(slot.day_of_week))
                .filter(Column::PeriodNumber.eq(slot.period_number))
                .filter(Column::AcademicYear.eq(slot.academic_year.as_str()))
                .filter(Column::IsActive.eq(true));
            match exclude_id {
                Some(id) => select.filter(Column::Id.ne(id)),
                None => select,
            }
        };

        let class_hits = same_slot()
            .filter(Column::ClassId.eq(slot.class_id))
            .count(txn)
            .await
            .map_err(txn_error("检查课表冲突失败"))?;
        if class_hits > 0 {
            return Err(SchoolError::conflict(CLASS_SLOT_CONFLICT));
        }

        if check_teacher {
            let teacher_hits = same_slot()
                .filter(Column::TeacherId.eq(slot.teacher_id))
                .count(txn)
                .await
                .map_err(txn_error("检查教师冲突失败"))?;
            if teacher_hits > 0 {
                return Err(SchoolError::conflict(TEACHER_SLOT_CONFLICT));
            }
        }

        Ok(())
    }

    /// 附带班级、科目、教师信息
    pub(crate) async fn timetable_views(
        &self,
        models: Vec<TimetableModel>,
    ) -> Result<Vec<TimetableEntryView>> {
        let classes = self.class_briefs(models.iter().map(|t| t.class_id)).await?;
        let subjects = self
            .subject_briefs(models.iter().map(|t| t.subject_id))
            .await?;
        let teachers = self.user_briefs(models.iter().map(|t| t.teacher_id)).await?;

        Ok(models
            .into_iter()
            .map(|m| TimetableEntryView {
                class: classes.get(&m.class_id).cloned(),
                subject: subjects.get(&m.subject_id).cloned(),
                teacher: teachers.get(&m.teacher_id).cloned(),
                entry: m.into_entry(),
            })
            .collect())
    }

    /// 范围内的有效课表
    pub async fn list_timetable_impl(
        &self,
        scope: AccessScope,
        query: TimetableListQuery,
    ) -> Result<Vec<TimetableEntryView>> {
        let mut select = Timetables::find()
            .filter(Column::SchoolId.eq(scope.school_id))
            .filter(Column::ClassId.in_subquery(scope::class_ids(&scope)))
            .filter(Column::IsActive.eq(true));

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(day_of_week) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day_of_week));
        }
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        let models = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::PeriodNumber)
            .all(&self.db)
            .await
            .map_err(db_error("查询课表失败"))?;

        self.timetable_views(models).await
    }

    pub async fn get_timetable_entry_impl(
        &self,
        school_id: i64,
        id: i64,
    ) -> Result<Option<TimetableEntry>> {
        let result = Timetables::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&self.db)
            .await
            .map_err(db_error("查询课表失败"))?;

        Ok(result.map(|m| m.into_entry()))
    }

    /// 新建课表条目
    pub async fn create_timetable_entry_impl(
        &self,
        school_id: i64,
        slot: TimetableSlot,
    ) -> Result<TimetableEntryView> {
        let txn = self.begin_serializable().await?;
        Self::check_slot_conflicts(&txn, school_id, &slot, None, true).await?;

        let now = now_ts();
        let model = ActiveModel {
            school_id: Set(school_id),
            class_id: Set(slot.class_id),
            subject_id: Set(slot.subject_id),
            teacher_id: Set(slot.teacher_id),
            day_of_week: Set(slot.day_of_week),
            period_number: Set(slot.period_number),
            start_time: Set(slot.start_time),
            end_time: Set(slot.end_time),
            room_number: Set(slot.room_number),
            academic_year: Set(slot.academic_year),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(txn_error("创建课表失败"))?;

        txn.commit().await.map_err(txn_error("提交事务失败"))?;

        self.timetable_views(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("课表创建后读取失败"))
    }

    /// 更新课表条目；仅在教师时段变化时检查教师冲突
    pub async fn update_timetable_entry_impl(
        &self,
        school_id: i64,
        id: i64,
        slot: TimetableSlot,
        check_teacher: bool,
    ) -> Result<TimetableEntryView> {
        let txn = self.begin_serializable().await?;

        let existing = Timetables::find_by_id(id)
            .filter(Column::SchoolId.eq(school_id))
            .one(&txn)
            .await
            .map_err(txn_error("查询课表失败"))?
            .ok_or_else(|| SchoolError::not_found("Timetable entry not found"))?;

        Self::check_slot_conflicts(&txn, school_id, &slot, Some(id), check_teacher).await?;

        let mut model = existing.into_active_model();
        model.class_id = Set(slot.class_id);
        model.subject_id = Set(slot.subject_id);
        model.teacher_id = Set(slot.teacher_id);
        model.day_of_week = Set(slot.day_of_week);
        model.period_number = Set(slot.period_number);
        model.start_time = Set(slot.start_time);
        model.end_time = Set(slot.end_time);
        model.room_number = Set(slot.room_number);
        model.academic_year = Set(slot.academic_year);
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&txn)
            .await
            .map_err(txn_error("更新课表失败"))?;

        txn.commit().await.map_err(txn_error("提交事务失败"))?;

        self.timetable_views(vec![updated])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("课表更新后读取失败"))
    }

    pub async fn deactivate_timetable_entry_impl(&self, id: i64) -> Result<bool> {
        let result = Timetables::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("停用课表失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 学年课表统计
    pub async fn get_timetable_stats_impl(
        &self,
        school_id: i64,
        academic_year: &str,
    ) -> Result<TimetableStats> {
        let entries = Timetables::find()
            .filter(Column::SchoolId.eq(school_id))
            .filter(Column::AcademicYear.eq(academic_year))
            .filter(Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(db_error("统计课表失败"))?;

        let classes: HashSet<i64> = entries.iter().map(|e| e.class_id).collect();
        let teachers: HashSet<i64> = entries.iter().map(|e| e.teacher_id).collect();
        let mut by_day: HashMap<i32, i64> = HashMap::new();
        for entry in &entries {
            *by_day.entry(entry.day_of_week).or_default() += 1;
        }

        Ok(TimetableStats {
            academic_year: academic_year.to_string(),
            total_entries: entries.len() as i64,
            classes_with_timetable: classes.len() as i64,
            teachers_with_timetable: teachers.len() as i64,
            entries_by_day: WEEK_ORDER
                .iter()
                .map(|&day| DayCount {
                    day_of_week: day,
                    day_name: day_name(day).to_string(),
                    count: by_day.get(&day).copied().unwrap_or(0),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_failure_detection() {
        let pg = DbErr::Custom("error returned from database: 40001 could not serialize access".into());
        assert!(is_serialization_failure(&pg));

        let other = DbErr::Custom("syntax error".into());
        assert!(!is_serialization_failure(&other));
    }

    #[test]
    fn test_serialization_failure_maps_to_conflict() {
        let err = txn_error("test")(DbErr::Custom("database is locked".into()));
        assert!(matches!(err, SchoolError::Conflict(_)));
    }
}
