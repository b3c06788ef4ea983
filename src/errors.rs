//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及对应的 HTTP 状态码。
//! `SchoolError` 同时实现了 `actix_web::ResponseError`，服务层可以直接用 `?`
//! 把存储层错误交给 actix，由这里统一转换为响应信封。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - status() 方法 - 返回 HTTP 状态码
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(SchoolError::$variant(_) => StatusCode::$status,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", UNPROCESSABLE_ENTITY),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E010", "Date Parse Error", BAD_REQUEST),
    Authentication("E011", "Authentication Error", UNAUTHORIZED),
    Authorization("E012", "Authorization Error", FORBIDDEN),
    Conflict("E013", "Conflict", CONFLICT),
    BadRequest("E014", "Bad Request", BAD_REQUEST),
}

impl SchoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于服务端内部错误（详情只写日志，不返回给客户端）
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl ResponseError for SchoolError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let message = if self.is_internal() {
            tracing::error!("{} ({})", self.format_simple(), self.code());
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        };

        HttpResponse::build(status).json(ApiResponse::error_empty(
            ErrorCode::from_status(status),
            message,
        ))
    }
}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => SchoolError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => SchoolError::BadRequest(msg),
            _ => match err {
                DbErr::RecordNotFound(msg) => SchoolError::NotFound(msg),
                other => SchoolError::DatabaseOperation(other.to_string()),
            },
        }
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for SchoolError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SchoolError::Authentication(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::conflict("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(SchoolError::conflict("dup").status(), StatusCode::CONFLICT);
        assert_eq!(SchoolError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            SchoolError::validation("weak").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            SchoolError::authentication("jwt").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SchoolError::database_operation("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(SchoolError::database_operation("boom").is_internal());
        assert!(!SchoolError::bad_request("fk").is_internal());
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: SchoolError = DbErr::RecordNotFound("class 1".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "class 1");
    }

    #[test]
    fn test_internal_error_response_hides_details() {
        let resp = SchoolError::database_operation("password=secret").error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
