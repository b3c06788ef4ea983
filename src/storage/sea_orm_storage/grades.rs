//! 成绩存储操作

use super::{SeaOrmStorage, db_error, fetch_page, now_ts, scope};
use crate::entity::grades::{ActiveModel, Column};
use crate::entity::prelude::{GradeModel, Grades, Students};
use crate::entity::students;
use crate::errors::{Result, SchoolError};
use crate::models::{
    AccessScope, PaginatedResponse,
    analytics::{
        facts::{FactFilter, GradeFact},
        requests::DateRange,
    },
    grades::{
        requests::{GradeListQuery, NewGrade},
        responses::GradeView,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Select, Set,
};

fn scoped(scope: &AccessScope) -> Select<Grades> {
    Grades::find().filter(Column::StudentId.in_subquery(scope::student_ids(scope)))
}

fn in_range(select: Select<Grades>, range: Option<DateRange>) -> Select<Grades> {
    match range {
        Some(range) => select
            .filter(Column::ExamDate.gte(range.start))
            .filter(Column::ExamDate.lte(range.end)),
        None => select,
    }
}

impl SeaOrmStorage {
    pub(crate) async fn grade_views(&self, models: Vec<GradeModel>) -> Result<Vec<GradeView>> {
        let students = self
            .student_briefs(models.iter().map(|g| g.student_id))
            .await?;
        let subjects = self
            .subject_briefs(models.iter().map(|g| g.subject_id))
            .await?;

        Ok(models
            .into_iter()
            .map(|m| GradeView {
                student: students.get(&m.student_id).cloned(),
                subject: subjects.get(&m.subject_id).cloned(),
                grade: m.into_grade(),
            })
            .collect())
    }

    /// 录入成绩
    pub async fn create_grade_impl(&self, grade: NewGrade) -> Result<GradeView> {
        let model = ActiveModel {
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id),
            teacher_id: Set(grade.teacher_id),
            exam_type: Set(grade.exam_type),
            exam_name: Set(grade.exam_name),
            marks_obtained: Set(grade.marks_obtained),
            total_marks: Set(grade.total_marks),
            percentage: Set(grade.percentage),
            grade: Set(grade.grade),
            exam_date: Set(grade.exam_date),
            remarks: Set(grade.remarks),
            created_at: Set(now_ts()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("录入成绩失败"))?;

        self.grade_views(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolError::database_operation("成绩读取失败"))
    }

    /// 分页列出范围内的成绩，考试日期倒序
    pub async fn list_grades_impl(
        &self,
        scope: AccessScope,
        query: GradeListQuery,
        range: Option<DateRange>,
    ) -> Result<PaginatedResponse<GradeView>> {
        let mut select = in_range(scoped(&scope), range);

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref exam_type) = query.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type));
        }

        let select = select
            .order_by_desc(Column::ExamDate)
            .order_by_desc(Column::Id);

        let (models, pagination) =
            fetch_page(&self.db, select, &query.pagination, "查询成绩列表失败").await?;

        Ok(PaginatedResponse {
            items: self.grade_views(models).await?,
            pagination,
        })
    }

    /// 成绩事实行，班级取学生当前所在班级
    pub async fn grade_facts_impl(
        &self,
        scope: AccessScope,
        filter: FactFilter,
    ) -> Result<Vec<GradeFact>> {
        let mut select = in_range(scoped(&scope), filter.range);

        if let Some(class_id) = filter.class_id {
            select = select.filter(
                Column::StudentId.in_subquery(
                    Students::find()
                        .select_only()
                        .column(students::Column::Id)
                        .filter(students::Column::ClassId.eq(class_id))
                        .into_query(),
                ),
            );
        }
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = filter.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref exam_type) = filter.exam_type {
            select = select.filter(Column::ExamType.eq(exam_type));
        }

        let models = select
            .order_by_desc(Column::ExamDate)
            .all(&self.db)
            .await
            .map_err(db_error("查询成绩统计失败"))?;

        let students = self
            .student_briefs(models.iter().map(|g| g.student_id))
            .await?;
        let subjects = self
            .subject_briefs(models.iter().map(|g| g.subject_id))
            .await?;
        let classes = self
            .class_models(students.values().map(|s| s.class_id))
            .await?;

        Ok(models
            .into_iter()
            .filter_map(|m| {
                let student = students.get(&m.student_id)?;
                let class = classes.get(&student.class_id);
                Some(GradeFact {
                    grade_id: m.id,
                    student_id: m.student_id,
                    class_id: student.class_id,
                    subject_id: m.subject_id,
                    teacher_id: m.teacher_id,
                    percentage: m.percentage,
                    exam_date: m.exam_date,
                    exam_type: m.exam_type,
                    subject_name: subjects
                        .get(&m.subject_id)
                        .map(|s| s.name.clone())
                        .unwrap_or_default(),
                    class_name: class.map(|c| c.name.clone()).unwrap_or_default(),
                    section: class.map(|c| c.section.clone()).unwrap_or_default(),
                    student_name: format!("{} {}", student.first_name, student.last_name),
                })
            })
            .collect())
    }
}
