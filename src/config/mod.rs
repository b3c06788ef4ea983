//! 配置管理
//!
//! 配置来源（优先级由低到高）：内置默认值、`config` 文件、`config.{APP_ENV}` 文件、
//! `SCHOOL__*` 环境变量、常用环境变量覆盖（`DATABASE_URL`、`JWT_SECRET` 等）。

mod r#impl;
mod structs;

pub use structs::*;
