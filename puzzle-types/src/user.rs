use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::LevelResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum UserRole {
    #[default]
    Default,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Default => "default",
            UserRole::Admin => "admin",
        }
    }

    /// Unknown values fall back to the default role
    pub fn from_db(value: &str) -> Self {
        match value {
            "admin" => UserRole::Admin,
            _ => UserRole::Default,
        }
    }
}

/// Stored account. Never sent to clients as-is, see [`ViewUser`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: Uuid,
    pub login: String,
    pub password_hash: String,
    pub role: UserRole,
    pub level_results: Option<Vec<LevelResult>>,
    pub created_at: String, // ISO 8601 string
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ViewUser {
    pub id: Uuid,
    pub login: String,
}

impl From<&UserAccount> for ViewUser {
    fn from(account: &UserAccount) -> Self {
        ViewUser {
            id: account.id,
            login: account.login.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}
