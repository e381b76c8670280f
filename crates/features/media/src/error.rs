use lobby_kernel::server::ApiError;
use lobby_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`MediaError`] enum of this crate.
#[lobby_derive::lobby_error]
pub enum MediaError {
    /// Missing part, empty file, or an extension outside the allow-list.
    #[error("Upload rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Upload too large{}: {message}", format_context(.context))]
    TooLarge { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed multipart body{}: {source}", format_context(.context))]
    Multipart { source: axum::extract::multipart::MultipartError, context: Option<Cow<'static, str>> },

    #[error("Upload storage failed{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Internal media error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl MediaError {
    pub(crate) fn rejected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { message: message.into(), context: None }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Rejected { message, context } => Self::BadRequest { message, context },
            MediaError::TooLarge { message, context } => Self::PayloadTooLarge { message, context },
            MediaError::Multipart { source, .. } => source.into(),
            MediaError::Storage { source, context } => Self::Storage { source, context },
            MediaError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
