//! Auth slice: admin accounts stored with bcrypt hashes, exchanged for HS256 bearer tokens.
//!
//! Routes (relative to `/api`): `POST /auth/login`, `GET /auth/me`, `POST /auth/register`,
//! `PUT /auth/password`. Token verification itself lives in the kernel's
//! [`AdminSession`](lobby_kernel::server::AdminSession) extractor so every slice can guard its
//! write routes without depending on this crate.

mod error;
mod handlers;
mod model;
mod password;
mod service;

pub use crate::error::{AuthError, AuthErrorExt};
pub use crate::handlers::*;
pub use crate::model::{AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
pub use crate::service::bootstrap;

use lobby_database::Migration;
use lobby_domain::config::ApiConfig;
use lobby_kernel::domain::registry::InitializedSlice;
use lobby_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SLICE: &str = "auth";
const BCRYPT_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

const SCHEMA_V1: &str = r"
DEFINE TABLE IF NOT EXISTS admin SCHEMALESS;
DEFINE INDEX IF NOT EXISTS admin_username ON TABLE admin FIELDS username UNIQUE;
";

/// Auth feature state.
#[lobby_derive::lobby_slice]
pub struct Accounts {
    password_cost: u32,
    decoy_hash: String,
}

impl Accounts {
    #[must_use]
    pub fn password_cost(&self) -> u32 {
        self.password_cost
    }

    pub(crate) fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}

/// Initialize the auth feature.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, AuthError> {
    let cost = config.security.password_cost;
    if !BCRYPT_COSTS.contains(&cost) {
        return Err(AuthError::validation(format!(
            "password_cost must be within {}..={}",
            BCRYPT_COSTS.start(),
            BCRYPT_COSTS.end()
        )));
    }

    let decoy_hash = password::decoy(cost)?;

    tracing::info!(password_cost = cost, "Auth server slice initialized");
    Ok(InitializedSlice::new(Accounts::new(AccountsInner { password_cost: cost, decoy_hash })))
}

/// Schema owned by this slice.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(SLICE, "0001_admin", SCHEMA_V1)]
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(login))
        .routes(routes!(me))
        .routes(routes!(register))
        .routes(routes!(change_password))
}
