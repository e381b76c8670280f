//! Facade crate for Lobby features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates, it does not implement business logic.
//!
//! ## Usage
//! - [`migrations`] feeds `DatabaseBuilder::migrations`.
//! - [`init`] builds the feature slices registered in `ApiState`.
//! - [`bootstrap`] performs first-start data seeding.
//! - [`api_router`] returns every route, to be nested under `/api`.

use lobby_database::{Database, DatabaseError, Migration};
pub use lobby_domain as domain;
use lobby_domain::config::ApiConfig;
use lobby_domain::registry::InitializedSlice;
pub use lobby_kernel as kernel;
use lobby_kernel::server::ApiState;
use lobby_storage::Storage;
use std::borrow::Cow;
use utoipa_axum::router::OpenApiRouter;

/// Feature registry for runtime introspection.
pub mod features {
    pub use lobby_auth as auth;
    pub use lobby_content as content;
    pub use lobby_media as media;
    pub use lobby_theme as theme;

    /// Features compiled into this build.
    pub const ENABLED: &[&str] = &["auth", "content", "media", "theme"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// A specialized [`LobbyError`] enum of this crate.
#[lobby_derive::lobby_error]
pub enum LobbyError {
    #[error("Auth feature error{}: {source}", format_context(.context))]
    Auth { source: lobby_auth::AuthError, context: Option<Cow<'static, str>> },

    #[error("Media feature error{}: {source}", format_context(.context))]
    Media { source: lobby_media::MediaError, context: Option<Cow<'static, str>> },

    #[error("Database error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },
}

/// Schema scripts of every feature, in dependency order.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    let mut all = features::auth::migrations();
    all.extend(features::theme::migrations());
    all.extend(features::content::migrations());
    all
}

/// Initialize all feature slices.
///
/// # Errors
/// Returns the first feature that refuses its configuration.
pub fn init(config: &ApiConfig, storage: &Storage) -> Result<Vec<InitializedSlice>, LobbyError> {
    let slices = vec![
        features::auth::init(config).context("Initializing auth")?,
        features::media::init(config, storage.clone()).context("Initializing media")?,
    ];

    tracing::info!(count = slices.len(), "Feature slices initialized");
    Ok(slices)
}

/// First-start seeding: creates the configured admin when none exists.
pub async fn bootstrap(config: &ApiConfig, database: &Database) -> Result<(), LobbyError> {
    features::auth::bootstrap(
        database,
        config.security.password_cost,
        config.security.bootstrap_admin.as_ref(),
    )
    .await
    .context("Bootstrapping admin account")?;

    Ok(())
}

/// Every API route: system, auth, theme and content.
pub fn api_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .merge(lobby_kernel::server::router::system_router())
        .merge(features::auth::router())
        .merge(features::theme::router())
        .merge(features::content::router())
}
