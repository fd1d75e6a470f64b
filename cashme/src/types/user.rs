use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::role::RoleSet;
use super::wallet::Wallet;

/// Current user profile, as returned by `GET /user/api/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: u64,
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: RoleSet,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Response of the login and register endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Body of `GET /user/api/all`: a bare array or a `{"users": [...]}` wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Bare(Vec<UserProfile>),
    Wrapped {
        #[serde(default)]
        users: Vec<UserProfile>,
    },
}

impl UserList {
    pub fn into_users(self) -> Vec<UserProfile> {
        match self {
            UserList::Bare(users) | UserList::Wrapped { users } => users,
        }
    }
}
