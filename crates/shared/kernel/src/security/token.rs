//! HS256 bearer tokens for admin sessions.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use lobby_domain::config::JwtConfig;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

#[lobby_derive::lobby_error]
pub enum TokenError {
    /// The token is missing, malformed, expired, or signed by someone else.
    #[error("Invalid token{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Token configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Token signing failed{}: {source}", format_context(.context))]
    Signing { source: jsonwebtoken::errors::Error, context: Option<Cow<'static, str>> },
}

/// Claims carried by an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin record key.
    pub sub: String,
    /// Display name at issue time.
    pub name: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

struct TokenServiceInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_seconds: u64,
}

/// Issues and verifies admin tokens. Cheap to clone.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<TokenServiceInner>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.inner.issuer)
            .field("ttl_seconds", &self.inner.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::Config { message: "JWT secret is empty".into(), context: None });
        }
        if config.ttl_seconds == 0 {
            return Err(TokenError::Config {
                message: "JWT ttl must be greater than zero".into(),
                context: None,
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 30;

        Ok(Self {
            inner: Arc::new(TokenServiceInner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                validation,
                issuer: config.issuer.clone(),
                ttl_seconds: config.ttl_seconds,
            }),
        })
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> u64 {
        self.inner.ttl_seconds
    }

    /// Signs a token for `subject`.
    pub fn issue(&self, subject: &str, name: &str) -> Result<IssuedToken, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(self.inner.ttl_seconds).unwrap_or(i64::MAX);
        self.sign(Claims {
            sub: subject.to_owned(),
            name: name.to_owned(),
            iss: self.inner.issuer.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
        })
    }

    pub(crate) fn sign(&self, claims: Claims) -> Result<IssuedToken, TokenError> {
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .context("Encoding admin token")?;
        Ok(IssuedToken { token, expires_in: self.inner.ttl_seconds })
    }

    /// Validates signature, issuer and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                let message = match err.kind() {
                    ErrorKind::ExpiredSignature => "Token expired",
                    ErrorKind::InvalidIssuer => "Token issuer mismatch",
                    ErrorKind::InvalidSignature => "Token signature mismatch",
                    _ => "Malformed token",
                };
                TokenError::Invalid { message: message.into(), context: Some(err.to_string().into()) }
            })
    }
}
