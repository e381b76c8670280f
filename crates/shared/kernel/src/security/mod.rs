//! Identifier hygiene and (server only) admin bearer tokens.

pub mod resource;
#[cfg(feature = "server")]
pub mod token;
