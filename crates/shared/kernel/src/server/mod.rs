//! Axum building blocks shared by every slice.

mod error;
mod extract;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ApiErrorExt, ErrorBody};
pub use extract::{AdminSession, Params, Payload, Slice};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
