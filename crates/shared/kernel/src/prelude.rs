//! Everything a feature slice usually needs in one import.

pub use crate::safe_nanoid;
pub use crate::singleton::{Patch, Singleton};
pub use lobby_derive::{api_handler, api_model, lobby_error, lobby_slice, singleton};

#[cfg(feature = "server")]
pub use crate::security::token::TokenService;
#[cfg(feature = "server")]
pub use crate::server::{AdminSession, ApiError, ApiErrorExt, ApiState, ErrorBody, Params, Payload, Slice};
