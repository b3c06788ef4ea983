//! 访问范围
//!
//! 由认证用户推导出的唯一授权谓词。存储层把它翻译成 SQL 子查询，
//! 所有需要按角色过滤的查询都必须经过它。

use crate::models::users::entities::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// 整个学校（管理员）
    School,
    /// 担任班主任的班级
    ClassTeacher(i64),
    /// 课表中有有效课时的班级
    SubjectTeacher(i64),
    /// 自己的孩子
    Parent(i64),
    /// 学生本人
    Student(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessScope {
    pub school_id: i64,
    pub kind: ScopeKind,
}

impl AccessScope {
    pub fn for_user(user: &User) -> Self {
        let kind = match user.role {
            UserRole::Admin => ScopeKind::School,
            UserRole::ClassTeacher => ScopeKind::ClassTeacher(user.id),
            UserRole::SubjectTeacher => ScopeKind::SubjectTeacher(user.id),
            UserRole::Parent => ScopeKind::Parent(user.id),
            UserRole::Student => ScopeKind::Student(user.id),
        };
        Self {
            school_id: user.school_id,
            kind,
        }
    }

    pub fn school(school_id: i64) -> Self {
        Self {
            school_id,
            kind: ScopeKind::School,
        }
    }

    pub fn is_school_wide(&self) -> bool {
        self.kind == ScopeKind::School
    }

    /// 非管理员范围对应的用户 ID
    pub fn user_id(&self) -> Option<i64> {
        match self.kind {
            ScopeKind::School => None,
            ScopeKind::ClassTeacher(id)
            | ScopeKind::SubjectTeacher(id)
            | ScopeKind::Parent(id)
            | ScopeKind::Student(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, school_id: i64, role: UserRole) -> User {
        User {
            id,
            school_id,
            email: format!("u{id}@example.com"),
            password_hash: String::new(),
            role,
            first_name: "Test".into(),
            last_name: "User".into(),
            phone: None,
            date_of_birth: None,
            gender: None,
            is_active: true,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_scope_from_role() {
        let admin = AccessScope::for_user(&user(1, 7, UserRole::Admin));
        assert_eq!(admin, AccessScope::school(7));
        assert!(admin.is_school_wide());
        assert_eq!(admin.user_id(), None);

        let teacher = AccessScope::for_user(&user(5, 7, UserRole::ClassTeacher));
        assert_eq!(teacher.kind, ScopeKind::ClassTeacher(5));
        assert_eq!(teacher.school_id, 7);

        let parent = AccessScope::for_user(&user(9, 2, UserRole::Parent));
        assert_eq!(parent.kind, ScopeKind::Parent(9));
        assert_eq!(parent.user_id(), Some(9));

        let subject = AccessScope::for_user(&user(4, 2, UserRole::SubjectTeacher));
        assert_eq!(subject.kind, ScopeKind::SubjectTeacher(4));

        let student = AccessScope::for_user(&user(3, 2, UserRole::Student));
        assert_eq!(student.kind, ScopeKind::Student(3));
    }
}
