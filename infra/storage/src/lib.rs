//! Sandboxed file storage used for uploaded media.
//!
//! * **Sandbox**: every path is resolved below the canonical root; `..`, absolute paths and
//!   symlinks that point outside are rejected.
//! * **Atomic writes**: data goes to a unique temp file, is `fsync`ed, then renamed in place.
//! * **Namespaces & sharding**: `<root>/<namespace>/<dirs>/<ab>/<cd>/<abcd...>` keeps
//!   directories small when file names are hashes.
//! * **Self-healing**: stale temp files from crashed writes are purged on startup.
//!
//! ```rust
//! use lobby_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path().join("uploads")).connect().await?;
//!     let sliders = storage.namespace("sliders")?;
//!
//!     let stored = sliders.write_once("9f86d081.png", b"png bytes").await?;
//!     assert_eq!(stored.url_path(), "sliders/9f/86/9f86d081.png");
//!     assert!(stored.created);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod namespace;
mod security;

pub use builder::StorageBuilder;
pub use engine::{Storage, StoredFile};
pub use error::{StorageError, StorageErrorExt};
pub use namespace::{NamespaceName, NamespacedStorage};
