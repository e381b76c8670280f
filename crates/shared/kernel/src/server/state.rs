use crate::security::token::TokenService;
use axum::extract::FromRef;
use lobby_database::Database;
use lobby_domain::config::ApiConfig;
use lobby_domain::registry::{FeatureSlice, InitializedSlice, SliceRegistry};
use lobby_storage::Storage;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[lobby_derive::lobby_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub storage: Storage,
    pub tokens: TokenService,
    slices: SliceRegistry,
}

/// Shared handler state: configuration, database, upload storage, token service and the
/// initialized feature slices.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get::<T>()
    }

    /// Returns the slice if it is registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Registered slice type names (for diagnostics).
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        self.inner.slices.names()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.database.clone()
    }
}

impl FromRef<ApiState> for Storage {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.storage.clone()
    }
}

impl FromRef<ApiState> for TokenService {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.tokens.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    storage: Option<Storage>,
    tokens: Option<TokenService>,
    slices: SliceRegistry,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Overrides the token service derived from `config.security.jwt`.
    #[must_use]
    pub fn tokens(mut self, tokens: TokenService) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice);
        self
    }

    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        for slice in slices {
            self.slices.insert(slice);
        }
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let missing = |what: &'static str| ApiStateError::Validation {
            message: format!("{what} not provided").into(),
            context: None,
        };

        let config = self.config.ok_or_else(|| missing("ApiConfig"))?;
        let database = self.database.ok_or_else(|| missing("Database"))?;
        let storage = self.storage.ok_or_else(|| missing("Storage"))?;
        let tokens = match self.tokens {
            Some(tokens) => tokens,
            None => TokenService::new(&config.security.jwt).map_err(|e| ApiStateError::Validation {
                message: e.to_string().into(),
                context: Some("Building token service".into()),
            })?,
        };

        Ok(ApiState {
            inner: Arc::new(ApiStateInner { config, database, storage, tokens, slices: self.slices }),
        })
    }
}
