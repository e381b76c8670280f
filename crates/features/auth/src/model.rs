use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use serde::{Deserialize, Serialize};

/// Stored admin account. Never leaves the crate; callers see [`AdminProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminRecord {
    #[serde(default)]
    pub id: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "lobby_kernel::time::rfc3339_option")]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Public view of an admin account.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    /// Display name
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminRecord> for AdminProfile {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            last_login_at: record.last_login_at,
        }
    }
}

#[api_model]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[api_model]
pub struct LoginResponse {
    /// Signed JWT
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub admin: AdminProfile,
}

/// A new admin account.
#[api_model]
pub struct RegisterRequest {
    /// `[a-z0-9_.-]{3,32}`, case-insensitive
    pub username: String,
    /// At least 8 characters
    pub password: String,
    pub name: String,
}

#[api_model]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
