use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::admin_user_entity;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<admin_user_entity::Model> for AdminUserResponse {
    fn from(m: admin_user_entity::Model) -> Self {
        AdminUserResponse {
            id: m.id,
            username: m.username,
            email: m.email,
            role: m.role,
            last_login: m.last_login,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAuthResponse {
    pub user: AdminUserResponse,
    pub access_token: String,
    pub refresh_token: String,
    /// access token lifetime in seconds
    pub expires_in: i64,
}
