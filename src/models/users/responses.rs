use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::User;

// 新建账号响应，临时密码只返回一次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user.ts")]
pub struct CreatedUserResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_password: Option<String>,
}
