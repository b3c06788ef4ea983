//! 查询参数的宽松反序列化
//!
//! 含 `#[serde(flatten)]` 分页字段的查询结构里，其余字段一律以字符串形式到达，
//! 数字和布尔筛选项需要从字符串解析。

use serde::Deserializer;
use serde::de::{Error, Unexpected, Visitor};
use std::fmt;

struct OptionalI64;

impl<'de> Visitor<'de> for OptionalI64 {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

struct OptionalBool;

impl<'de> Visitor<'de> for OptionalBool {
    type Value = Option<bool>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean or \"true\"/\"false\"")
    }

    fn visit_bool<E: Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        match value.trim() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(Error::invalid_value(Unexpected::Str(other), &self)),
        }
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalI64)
}

pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptionalBool)
}

#[cfg(test)]
mod tests {
    use crate::models::classes::requests::ClassListQuery;
    use crate::models::homework::requests::HomeworkListQuery;
    use actix_web::web::Query;

    #[test]
    fn test_flattened_query_parses_numbers_and_bools() {
        let q = Query::<HomeworkListQuery>::from_query("page=2&limit=5&classId=7&isPublished=true")
            .unwrap()
            .into_inner();
        assert_eq!(q.pagination.page, 2);
        assert_eq!(q.class_id, Some(7));
        assert_eq!(q.is_published, Some(true));
        assert_eq!(q.subject_id, None);
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let q = Query::<ClassListQuery>::from_query("isActive=maybe");
        assert!(q.is_err());
    }
}
