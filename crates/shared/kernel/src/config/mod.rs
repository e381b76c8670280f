use config::{Config, Environment, File};
use lobby_domain::config::ApiConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[lobby_derive::lobby_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Layers an optional config file with `LOBBY__` environment overrides.
///
/// 1. **Base File**: `path` (default `server`; any extension `config` understands, e.g.
///    `server.toml`). A missing file is not an error, so the service can run from defaults and
///    environment alone.
/// 2. **Environment Overrides**: variables prefixed with `LOBBY__`, nested with double
///    underscores (`LOBBY__DATABASE__URL` maps to `database.url`).
///
/// # Example
/// ```rust
/// use lobby_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix("LOBBY")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Rejects settings the server cannot start with.
pub fn validate_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let invalid = |message: &'static str| ConfigError::Invalid { message: message.into(), context: None };

    if config.security.jwt.secret.trim().is_empty() {
        return Err(invalid("security.jwt.secret must not be empty"));
    }
    if config.security.jwt.ttl_seconds == 0 {
        return Err(invalid("security.jwt.ttl_seconds must be greater than zero"));
    }
    if !(4..=31).contains(&config.security.password_cost) {
        return Err(invalid("security.password_cost must be between 4 and 31"));
    }
    if config.uploads.max_file_size == 0 {
        return Err(invalid("uploads.max_file_size must be greater than zero"));
    }
    if let Some(admin) = &config.security.bootstrap_admin
        && (admin.username.trim().is_empty() || admin.password.is_empty())
    {
        return Err(invalid("security.bootstrap_admin needs a username and a password"));
    }

    Ok(())
}

/// Loads the full [`ApiConfig`] and validates it.
pub fn load_api_config(path: Option<impl AsRef<Path>>) -> Result<ApiConfig, ConfigError> {
    let config: ApiConfig = load_config(path)?;
    validate_config(&config)?;
    Ok(config)
}
