use lobby_database::DatabaseError;
use lobby_kernel::security::token::TokenError;
use lobby_kernel::server::ApiError;
use std::borrow::Cow;

/// The one message shown for every failed login, whatever the cause.
pub(crate) const BAD_CREDENTIALS: &str = "Invalid username or password";

/// A specialized [`AuthError`] enum of this crate.
#[lobby_derive::lobby_error]
pub enum AuthError {
    /// Unknown user or wrong password.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Credentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid account data{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Account conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The token names an account that no longer exists.
    #[error("Account not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Password hashing failed{}: {source}", format_context(.context))]
    Hashing { source: bcrypt::BcryptError, context: Option<Cow<'static, str>> },

    #[error("Account storage failed{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Token failure{}: {source}", format_context(.context))]
    Token { source: TokenError, context: Option<Cow<'static, str>> },

    #[error("Internal auth error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl AuthError {
    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    pub(crate) fn credentials(context: impl Into<Cow<'static, str>>) -> Self {
        Self::Credentials { message: BAD_CREDENTIALS.into(), context: Some(context.into()) }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Credentials { message, context } | AuthError::NotFound { message, context } => {
                Self::Unauthorized { message, context }
            },
            AuthError::Validation { message, context } => Self::BadRequest { message, context },
            AuthError::Conflict { message, context } => Self::Conflict { message, context },
            AuthError::Database { source, context } => Self::Database { source, context },
            AuthError::Token { source, .. } => source.into(),
            other @ (AuthError::Hashing { .. } | AuthError::Internal { .. }) => {
                Self::Internal { message: other.to_string().into(), context: None }
            },
        }
    }
}
