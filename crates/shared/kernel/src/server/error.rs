use crate::security::resource::ResourceGuardError;
use crate::security::token::TokenError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lobby_database::DatabaseError;
use lobby_derive::api_model;
use lobby_storage::StorageError;
use std::borrow::Cow;
use tracing::{error, warn};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// The error every handler returns; rendered as `{"status": <code>, "message": <text>}`.
///
/// Client errors carry their message to the caller. Server errors are logged with full detail
/// and answered with a generic message.
#[lobby_derive::lobby_error]
pub enum ApiError {
    #[error("Bad request{}: {message}", format_context(.context))]
    BadRequest { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unauthorized{}: {message}", format_context(.context))]
    Unauthorized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Payload too large{}: {message}", format_context(.context))]
    PayloadTooLarge { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database failure{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Uniform error body.
#[api_model]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,
    /// Human readable reason
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into(), context: None }
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized { message: message.into(), context: None }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict { message: message.into(), context: None }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database { source, .. } => match source {
                DatabaseError::Conflict { .. } => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage { source, .. } => match source {
                StorageError::FileNotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::InvalidNamespace { .. } | StorageError::PathTraversalAttempt { .. } => {
                    StatusCode::BAD_REQUEST
                },
                StorageError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to the caller.
    fn public_message(&self) -> Cow<'static, str> {
        match self {
            Self::BadRequest { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::PayloadTooLarge { message, .. } => message.clone(),
            Self::Database { source: DatabaseError::Conflict { .. }, .. } => {
                "Resource already exists".into()
            },
            Self::Storage { source: StorageError::FileNotFound { .. }, .. } => "File not found".into(),
            Self::Storage {
                source: StorageError::InvalidNamespace { .. } | StorageError::PathTraversalAttempt { .. },
                ..
            } => "Invalid file path".into(),
            _ => INTERNAL_MESSAGE.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else if matches!(self, Self::Storage { .. }) {
            warn!(status = status.as_u16(), error = %self, "Rejected storage access");
        }

        let body = ErrorBody { status: status.as_u16(), message: self.public_message().into_owned() };
        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid { .. } => Self::Unauthorized {
                message: "Invalid or expired token".into(),
                context: Some(err.to_string().into()),
            },
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}

impl From<ResourceGuardError> for ApiError {
    fn from(err: ResourceGuardError) -> Self {
        Self::NotFound { message: "Resource not found".into(), context: Some(err.to_string().into()) }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge { message: "Upload exceeds the size limit".into(), context: None }
        } else {
            Self::BadRequest { message: err.body_text().into(), context: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, body) = render(ApiError::bad_request("Unknown field `foo`")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Unknown field `foo`");
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let err = ApiError::Database {
            source: DatabaseError::Internal { message: "disk on fire".into(), context: None },
            context: None,
        };
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");

        let (_, body) = render(ApiError::from("secret detail")).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn database_conflicts_are_409() {
        let err: ApiError =
            DatabaseError::Conflict { message: "index".into(), context: None }.into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Resource already exists");
    }

    #[test]
    fn token_failures_are_401() {
        let err: ApiError = TokenError::Invalid { message: "expired".into(), context: None }.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
