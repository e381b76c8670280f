#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every Lobby crate.
//!
//! * [`lobby_error`] turns an enum into a `thiserror` error with `.context()` support.
//! * [`api_model`] / [`api_handler`] keep DTOs and handlers consistent with the `OpenAPI` docs.
//! * [`singleton`] declares a configuration document with static defaults.
//! * [`lobby_slice`] defines a feature slice handle.
//! * [`main`] boots the tuned Tokio runtime.
//!
//! Examples are `ignore`d because they need the consuming crates in scope.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from `lobby-runtime`.
///
/// Transforms an `async fn main` returning a `Result` into a synchronous `main`
/// that builds the runtime for the requested profile and blocks on the body.
///
/// # Profiles
///
/// * `server` - Multi-threaded, larger stacks, long thread keep-alive.
/// * `compact` - Half the workers and smaller stacks (CLI tools, tests).
/// * no argument - The default profile.
///
/// # Examples
///
/// ```rust,ignore
/// #[lobby_runtime::main(server)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define an API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: Adds `Debug`, `Serialize`, and `Deserialize` if missing.
/// * **`OpenAPI`**: Adds `utoipa::ToSchema` when the `server` feature is enabled.
/// * **Serde Policy**:
///     * `rename_all = "camelCase"` by default (can be overridden).
///     * `deny_unknown_fields` by default (can be disabled).
///
/// # Example
///
/// ```rust,ignore
/// use lobby_derive::api_model;
///
/// #[api_model]
/// pub struct LoginRequest {
///     pub username: String,
///     pub password: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts the standard `utoipa::path` arguments and registers them only when the
/// `server` feature is enabled.
///
/// # Example
///
/// ```rust,ignore
/// use lobby_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> impl IntoResponse {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a configuration singleton: one document per table, seeded from static defaults.
///
/// Every field may carry a `#[default(...)]` attribute. String literals are converted with
/// `From<&'static str>`, other literals and expressions are used as written, and fields
/// without the attribute fall back to `Default::default()`.
///
/// # Arguments
///
/// * `table = "..."` - Storage table (required).
/// * `slug = "..."` - URL segment under `/api` (required).
/// * `validate = path::to_fn` - Optional `fn(&Self) -> Result<(), Cow<'static, str>>`
///   invoked before the document is saved.
///
/// # Generated Items
///
/// * `Debug`, `Clone`, `PartialEq`, `Serialize`, `Deserialize` (+ `ToSchema` on `server`).
/// * camelCase fields with container-level `#[serde(default)]`.
/// * `impl Default` built from the field defaults.
/// * `impl lobby_kernel::singleton::Singleton`.
///
/// # Example
///
/// ```rust,ignore
/// #[singleton(table = "navbar_color", slug = "navbar-color")]
/// pub struct NavbarColor {
///     #[default("#0b0f1a")]
///     pub background_color: Color,
///     #[default(64)]
///     pub height: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn singleton(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::singleton::expand_singleton(args.into(), input).into()
}

/// Defines domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Context Access**: Generates `context_note()` returning the attached context, if any.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context carry a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors carry a `source: T` field (or `#[source]`/`#[from]`)
///    and must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use lobby_derive::lobby_error;
/// use std::borrow::Cow;
///
/// #[lobby_error]
/// pub enum StorageError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn lobby_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// 1. Generates an `Arc` wrapper around a `<Name>Inner` struct.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in `ApiState`.
///
/// # Example
/// ```rust,ignore
/// #[lobby_derive::lobby_slice]
/// pub struct Auth {
///     pub password_cost: u32,
/// }
///
/// let auth = Auth::new(AuthInner { password_cost: 12 });
/// ```
#[proc_macro_attribute]
pub fn lobby_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
