//! 路径参数提取器
//!
//! 统一校验路径中的 i64 id，非法值直接返回 400 响应信封。

use actix_web::error::InternalError;

use crate::models::{ApiResponse, ErrorCode};

/// 解析正整数 id
pub fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|id| *id > 0)
}

/// 生成只接受正整数的路径参数提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                futures_util::future::ready(
                    match $crate::utils::extractor::parse_positive_id(req.match_info().get($param))
                    {
                        Some(id) => Ok($name(id)),
                        None => Err($crate::utils::extractor::invalid_param_error($param)),
                    },
                )
            }
        }
    };
}

pub fn invalid_param_error(param: &str) -> actix_web::Error {
    let response = actix_web::HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter: {param}"),
    ));
    InternalError::from_response(format!("invalid {param}"), response).into()
}

define_safe_i64_extractor!(SafeIDI64, "id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test::TestRequest};

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("15")), Some(15));
        assert_eq!(parse_positive_id(Some("0")), None);
        assert_eq!(parse_positive_id(Some("-3")), None);
        assert_eq!(parse_positive_id(Some("abc")), None);
        assert_eq!(parse_positive_id(None), None);
    }

    #[actix_web::test]
    async fn test_safe_id_extractor() {
        let req = TestRequest::default().param("id", "27").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 27);

        let bad = TestRequest::default().param("id", "x").to_http_request();
        assert!(SafeIDI64::extract(&bad).await.is_err());
    }
}
