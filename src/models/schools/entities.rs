use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学校（租户）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "school.ts")]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub domain: String,
    pub timezone: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 由学校名称生成二级域名：去掉空白并转小写
pub fn school_domain(name: &str, suffix: &str) -> String {
    let slug: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    format!("{slug}.{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_domain() {
        assert_eq!(
            school_domain("Green Valley High", "schoolmanagement.com"),
            "greenvalleyhigh.schoolmanagement.com"
        );
        assert_eq!(school_domain(" St\tMary ", "example.org"), "stmary.example.org");
    }
}
