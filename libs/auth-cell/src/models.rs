use serde::{Deserialize, Serialize};

use shared_models::auth::{active_role, Role, TokenPair};
use shared_models::user::{Profile, User, UserStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub phone: String,
    pub name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    #[serde(default)]
    pub roles: Vec<String>,
    pub user: Option<User>,
}

/// `/auth/me` payload. Some backend variants return a single `role`,
/// others only a `roles` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub phone: String,
    pub name: String,
    pub role: Option<Role>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub status: Option<UserStatus>,
    pub major_doctor: Option<String>,
    pub profile: Option<Profile>,
}

impl CurrentUser {
    /// Resolve the active role: an explicit `role` field wins, otherwise
    /// the first entry of the `roles` array.
    pub fn normalized(mut self) -> Self {
        if self.role.is_none() {
            self.role = active_role(&self.roles);
        }
        self
    }
}
