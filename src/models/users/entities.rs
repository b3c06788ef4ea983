use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Admin,          // 学校管理员
    ClassTeacher,   // 班主任
    SubjectTeacher, // 任课教师
    Parent,         // 家长
    Student,        // 学生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const CLASS_TEACHER: &'static str = "class_teacher";
    pub const SUBJECT_TEACHER: &'static str = "subject_teacher";
    pub const PARENT: &'static str = "parent";
    pub const STUDENT: &'static str = "student";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 管理员与班主任
    pub fn class_manager_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::ClassTeacher]
    }
    /// 管理员与全部教师
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::ClassTeacher, &Self::SubjectTeacher]
    }
    /// 仅教师（不含管理员）
    pub fn teaching_staff_roles() -> &'static [&'static UserRole] {
        &[&Self::ClassTeacher, &Self::SubjectTeacher]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::ClassTeacher,
            &Self::SubjectTeacher,
            &Self::Parent,
            &Self::Student,
        ]
    }

    pub fn is_teacher(&self) -> bool {
        matches!(self, UserRole::ClassTeacher | UserRole::SubjectTeacher)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::ClassTeacher => Self::CLASS_TEACHER,
            UserRole::SubjectTeacher => Self::SUBJECT_TEACHER,
            UserRole::Parent => Self::PARENT,
            UserRole::Student => Self::STUDENT,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: admin, class_teacher, subject_teacher, parent, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ADMIN => Ok(UserRole::Admin),
            Self::CLASS_TEACHER => Ok(UserRole::ClassTeacher),
            Self::SUBJECT_TEACHER => Ok(UserRole::SubjectTeacher),
            Self::PARENT => Ok(UserRole::Parent),
            Self::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub school_id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// 关联展示用的精简用户信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct UserBrief {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserBrief {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in UserRole::all_roles() {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), **role);
        }
        assert!("teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let role: UserRole = serde_json::from_str("\"class_teacher\"").unwrap();
        assert_eq!(role, UserRole::ClassTeacher);
        assert!(serde_json::from_str::<UserRole>("\"root\"").is_err());
        assert_eq!(
            serde_json::to_string(&UserRole::SubjectTeacher).unwrap(),
            "\"subject_teacher\""
        );
    }

    #[test]
    fn test_teacher_groups() {
        assert!(UserRole::ClassTeacher.is_teacher());
        assert!(!UserRole::Admin.is_teacher());
        assert!(UserRole::teacher_roles().contains(&&UserRole::Admin));
        assert!(!UserRole::teaching_staff_roles().contains(&&UserRole::Admin));
    }
}
