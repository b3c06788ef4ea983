//! 访问范围到查询条件的转换
//!
//! 所有按角色过滤的查询都从这里取子查询或条件，不在各资源模块里重复判断角色。

use crate::entity::{classes, complaints, qa_messages, students, timetables, users};
use crate::entity::prelude::{Classes, Students, Timetables, Users};
use crate::models::{AccessScope, ScopeKind};
use sea_orm::sea_query::SelectStatement;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait};

/// 范围内的班级 ID
pub(crate) fn class_ids(scope: &AccessScope) -> SelectStatement {
    let select = Classes::find()
        .select_only()
        .column(classes::Column::Id)
        .filter(classes::Column::SchoolId.eq(scope.school_id));

    let select = match scope.kind {
        ScopeKind::School => select,
        ScopeKind::ClassTeacher(user_id) => {
            select.filter(classes::Column::ClassTeacherId.eq(user_id))
        }
        ScopeKind::SubjectTeacher(user_id) => select.filter(
            classes::Column::Id.in_subquery(
                Timetables::find()
                    .select_only()
                    .column(timetables::Column::ClassId)
                    .filter(timetables::Column::TeacherId.eq(user_id))
                    .filter(timetables::Column::IsActive.eq(true))
                    .into_query(),
            ),
        ),
        ScopeKind::Parent(user_id) => select.filter(
            classes::Column::Id.in_subquery(
                Students::find()
                    .select_only()
                    .column(students::Column::ClassId)
                    .filter(students::Column::ParentId.eq(user_id))
                    .into_query(),
            ),
        ),
        ScopeKind::Student(user_id) => select.filter(
            classes::Column::Id.in_subquery(
                Students::find()
                    .select_only()
                    .column(students::Column::ClassId)
                    .filter(students::Column::UserId.eq(user_id))
                    .into_query(),
            ),
        ),
    };

    select.into_query()
}

/// 范围内的学生 ID
pub(crate) fn student_ids(scope: &AccessScope) -> SelectStatement {
    let select = Students::find()
        .select_only()
        .column(students::Column::Id)
        .filter(students::Column::ClassId.in_subquery(class_ids(scope)));

    let select = match scope.kind {
        ScopeKind::Parent(user_id) => select.filter(students::Column::ParentId.eq(user_id)),
        ScopeKind::Student(user_id) => select.filter(students::Column::UserId.eq(user_id)),
        _ => select,
    };

    select.into_query()
}

/// 学校内的用户 ID
pub(crate) fn school_user_ids(school_id: i64) -> SelectStatement {
    Users::find()
        .select_only()
        .column(users::Column::Id)
        .filter(users::Column::SchoolId.eq(school_id))
        .into_query()
}

/// 问答可见范围：家长看自己的，班主任看发给自己的，管理员看全校
pub(crate) fn qa_condition(scope: &AccessScope) -> Condition {
    match scope.kind {
        ScopeKind::School => Condition::all()
            .add(qa_messages::Column::StudentId.in_subquery(student_ids(scope))),
        ScopeKind::Parent(user_id) => {
            Condition::all().add(qa_messages::Column::ParentId.eq(user_id))
        }
        ScopeKind::ClassTeacher(user_id) => {
            Condition::all().add(qa_messages::Column::ClassTeacherId.eq(user_id))
        }
        // 主键不会为空，条件恒为假
        ScopeKind::SubjectTeacher(_) | ScopeKind::Student(_) => {
            Condition::all().add(qa_messages::Column::Id.is_null())
        }
    }
}

/// 投诉可见范围：管理员看全校，班主任看分配给自己的，家长与学生看自己提交的
pub(crate) fn complaint_condition(scope: &AccessScope) -> Condition {
    let school_students =
        complaints::Column::StudentId.in_subquery(student_ids(&AccessScope::school(scope.school_id)));

    match scope.kind {
        ScopeKind::School => Condition::all().add(school_students),
        ScopeKind::ClassTeacher(user_id) => Condition::all()
            .add(complaints::Column::ClassTeacherId.eq(user_id))
            .add(school_students),
        ScopeKind::Parent(user_id) | ScopeKind::Student(user_id) => Condition::all()
            .add(complaints::Column::ComplainantId.eq(user_id))
            .add(school_students),
        ScopeKind::SubjectTeacher(_) => Condition::all().add(complaints::Column::Id.is_null()),
    }
}
