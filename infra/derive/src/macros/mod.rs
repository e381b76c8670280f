pub mod api;
mod args;
pub mod error;
pub mod runtime;
pub mod singleton;
pub mod slice;
