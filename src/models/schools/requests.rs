use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub timezone: Option<String>,
}

/// 存储层使用的新学校数据
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub domain: String,
    pub timezone: String,
}
