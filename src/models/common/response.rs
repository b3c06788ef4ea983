use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{ErrorCode, PaginationInfo};

// 字段级校验错误
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl ValidationDetail {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// 统一的API响应结构，缺省字段不输出
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            details: None,
            pagination: None,
        }
    }

    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            details: None,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: PaginationInfo) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            details: None,
            pagination: Some(pagination),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message.into()),
            error: Some(code),
            details: None,
            pagination: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            details: None,
            pagination: None,
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(code),
            details: None,
            pagination: None,
        }
    }

    pub fn validation_error(message: impl Into<String>, details: Vec<ValidationDetail>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(ErrorCode::ValidationError),
            details: Some(details),
            pagination: None,
        }
    }

    /// 构造带状态码的错误响应
    pub fn respond(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(code.status()).json(Self::error_empty(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let value = serde_json::to_value(ApiResponse::success_empty("ok")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "ok");
        assert!(value.get("data").is_none());
        assert!(value.get("error").is_none());
        assert!(value.get("pagination").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let resp = ApiResponse::paginated(vec![1, 2], PaginationInfo::new(1, 20, 2));
        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(value["pagination"]["totalPages"], 1);
        assert_eq!(value["pagination"]["limit"], 20);
        assert_eq!(value["data"][1], 2);
    }

    #[test]
    fn test_validation_error_envelope() {
        let resp = ApiResponse::validation_error(
            "Password does not meet requirements",
            vec![ValidationDetail::new("password", "too short")],
        );
        let value = serde_json::to_value(resp).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "VALIDATION_ERROR");
        assert_eq!(value["details"][0]["field"], "password");
    }
}
