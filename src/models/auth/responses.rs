use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{schools::entities::School, users::entities::User};

// 令牌对
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "auth.ts")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// access token 有效期（秒）
    pub expires_in: i64,
}

// 注册 / 登录响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "auth.ts")]
pub struct AuthResponse {
    pub user: User,
    pub school: School,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "auth.ts")]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

// 个人资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "auth.ts")]
pub struct ProfileResponse {
    pub user: User,
    pub school: Option<School>,
}
