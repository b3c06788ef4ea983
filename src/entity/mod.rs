//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod attendance;
pub mod classes;
pub mod complaints;
pub mod grades;
pub mod homework_submissions;
pub mod homeworks;
pub mod notifications;
pub mod qa_messages;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod timetables;
pub mod users;

use chrono::{DateTime, Utc};

/// 数据库中的 unix 秒转为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
