//! 关联数据批量加载
//!
//! 列表视图需要的用户、班级、科目、学生信息一次性按 ID 取回，避免逐行查询。

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::{
    ClassModel, Classes, HomeworkSubmissions, Students, Subjects, UserModel, Users,
};
use crate::entity::{classes, homework_submissions, students, subjects, users};
use crate::errors::Result;
use crate::models::{
    classes::entities::ClassBrief, students::entities::StudentBrief,
    subjects::entities::SubjectBrief, users::entities::UserBrief,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};

/// 去重后的 ID 列表
pub(crate) fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let set: HashSet<i64> = ids.into_iter().collect();
    set.into_iter().collect()
}

impl SeaOrmStorage {
    pub(crate) async fn user_models(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, UserModel>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Users::find()
            .filter(users::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error("查询用户失败"))?;

        Ok(rows.into_iter().map(|m| (m.id, m)).collect())
    }

    pub(crate) async fn user_briefs(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, UserBrief>> {
        let users = self.user_models(ids).await?;
        Ok(users.into_iter().map(|(id, m)| (id, m.brief())).collect())
    }

    pub(crate) async fn class_models(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, ClassModel>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Classes::find()
            .filter(classes::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error("查询班级失败"))?;

        Ok(rows.into_iter().map(|m| (m.id, m)).collect())
    }

    pub(crate) async fn class_briefs(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, ClassBrief>> {
        let classes = self.class_models(ids).await?;
        Ok(classes
            .into_iter()
            .map(|(id, m)| {
                (
                    id,
                    ClassBrief {
                        id,
                        name: m.name,
                        section: m.section,
                    },
                )
            })
            .collect())
    }

    pub(crate) async fn subject_briefs(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, SubjectBrief>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Subjects::find()
            .filter(subjects::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error("查询科目失败"))?;

        Ok(rows
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    SubjectBrief {
                        id: m.id,
                        name: m.name,
                        code: m.code,
                    },
                )
            })
            .collect())
    }

    /// 学生档案 + 姓名
    pub(crate) async fn student_briefs(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, StudentBrief>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .filter(students::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error("查询学生失败"))?;
        let users = self.user_models(rows.iter().map(|s| s.user_id)).await?;

        Ok(rows
            .into_iter()
            .filter_map(|s| {
                let user = users.get(&s.user_id)?;
                Some((
                    s.id,
                    StudentBrief {
                        id: s.id,
                        user_id: s.user_id,
                        class_id: s.class_id,
                        roll_number: s.roll_number,
                        first_name: user.first_name.clone(),
                        last_name: user.last_name.clone(),
                    },
                ))
            })
            .collect())
    }

    /// 各班有效学生人数
    pub(crate) async fn student_counts(
        &self,
        class_ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, i64>> {
        let ids = unique_ids(class_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = Students::find()
            .select_only()
            .column(students::Column::ClassId)
            .column_as(students::Column::Id.count(), "count")
            .filter(students::Column::ClassId.is_in(ids))
            .filter(students::Column::IsActive.eq(true))
            .group_by(students::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("统计班级人数失败"))?;

        Ok(rows.into_iter().collect())
    }

    /// 各作业的提交数
    pub(crate) async fn submission_counts(
        &self,
        homework_ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, i64>> {
        let ids = unique_ids(homework_ids);
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = HomeworkSubmissions::find()
            .select_only()
            .column(homework_submissions::Column::HomeworkId)
            .column_as(homework_submissions::Column::Id.count(), "count")
            .filter(homework_submissions::Column::HomeworkId.is_in(ids))
            .group_by(homework_submissions::Column::HomeworkId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("统计作业提交失败"))?;

        Ok(rows.into_iter().collect())
    }
}
