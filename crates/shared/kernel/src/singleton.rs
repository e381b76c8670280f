//! Config singletons: tables that hold exactly one document, seeded with defaults on first
//! read and patched in place.
//!
//! Models are declared with `#[lobby_derive::singleton]`; the HTTP surface for a group of them
//! comes from [`singleton_routes!`](crate::singleton_routes).

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// A partial update: a JSON object whose keys are a subset of the document's fields.
pub type Patch = serde_json::Value;

/// A document type stored as the single record of its table.
pub trait Singleton: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Backing table.
    const TABLE: &'static str;
    /// Route segment below `/api`.
    const SLUG: &'static str;

    /// Cross-field checks run after a patch is merged.
    fn validate(&self) -> Result<(), Cow<'static, str>> {
        Ok(())
    }
}

#[cfg(feature = "server")]
pub mod store {
    //! Database operations shared by every singleton.

    use super::{Patch, Singleton};
    use crate::server::{AdminSession, ApiError};
    use lobby_database::{Database, DatabaseError};
    use lobby_domain::constants::SINGLETON_KEY;
    use serde_json::{Map, Value};
    use tracing::{debug, info};

    /// Returns the stored document, creating it from defaults when absent.
    ///
    /// Concurrent first reads race on `CREATE`; the losers re-read the winner's row, so every
    /// caller observes the same document.
    pub async fn load<T: Singleton>(db: &Database) -> Result<T, ApiError> {
        if let Some(document) = db.fetch::<T>(T::TABLE, SINGLETON_KEY).await? {
            return Ok(document);
        }

        let seeded = T::default();
        match db.create(T::TABLE, SINGLETON_KEY, &seeded).await {
            Ok(()) => {
                info!(table = T::TABLE, slug = T::SLUG, "Seeded default document");
                Ok(seeded)
            },
            Err(DatabaseError::Conflict { .. }) => {
                debug!(table = T::TABLE, "Lost seeding race, re-reading");
                db.fetch::<T>(T::TABLE, SINGLETON_KEY).await?.ok_or_else(|| {
                    ApiError::from(format!("{} vanished after a concurrent seed", T::TABLE))
                })
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Applies `patch` over the stored (or default) document and upserts the result.
    pub async fn update<T: Singleton>(
        db: &Database,
        patch: Patch,
        admin: &AdminSession,
    ) -> Result<T, ApiError> {
        let current = db.fetch::<T>(T::TABLE, SINGLETON_KEY).await?.unwrap_or_default();
        let merged = merge(&current, patch)?;
        save(db, &merged).await?;

        info!(table = T::TABLE, slug = T::SLUG, admin = %admin.id, "Document updated");
        Ok(merged)
    }

    /// Overwrites the stored document with the defaults.
    pub async fn reset<T: Singleton>(db: &Database, admin: &AdminSession) -> Result<T, ApiError> {
        let defaults = T::default();
        save(db, &defaults).await?;

        info!(table = T::TABLE, slug = T::SLUG, admin = %admin.id, "Document reset to defaults");
        Ok(defaults)
    }

    /// Upserts a complete document.
    pub async fn save<T: Singleton>(db: &Database, document: &T) -> Result<(), ApiError> {
        db.upsert(T::TABLE, SINGLETON_KEY, document).await?;
        Ok(())
    }

    /// Merges top-level keys of `patch` into `current`.
    ///
    /// Unknown keys, ill-typed values and failed [`Singleton::validate`] checks are rejected
    /// with 400 before anything is written. An `id` key (echoed back by clients) is ignored.
    pub fn merge<T: Singleton>(current: &T, patch: Patch) -> Result<T, ApiError> {
        let Value::Object(changes) = patch else {
            return Err(ApiError::bad_request("Expected a JSON object"));
        };

        let mut document = match serde_json::to_value(current) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(ApiError::from("Singleton must serialize to an object")),
            Err(err) => return Err(ApiError::from(err.to_string())),
        };

        for (key, value) in changes {
            if key == "id" {
                continue;
            }
            if !document.contains_key(&key) {
                return Err(ApiError::bad_request(format!("Unknown field `{key}`")));
            }
            document.insert(key, value);
        }

        let merged: T = serde_json::from_value(Value::Object(document))
            .map_err(|err| ApiError::bad_request(err.to_string()))?;
        merged.validate().map_err(ApiError::bad_request)?;

        Ok(merged)
    }

    /// Inserts `document` into a `{slug: document}` map.
    pub fn collect<T: Singleton>(all: &mut Map<String, Value>, document: &T) -> Result<(), ApiError> {
        let value = serde_json::to_value(document).map_err(|err| ApiError::from(err.to_string()))?;
        all.insert(T::SLUG.to_owned(), value);
        Ok(())
    }
}

/// Generates a module per singleton with `GET`/`PUT <path>` and `POST <reset path>` handlers,
/// plus `singleton_router()` mounting them all and `snapshot()` returning every document keyed
/// by slug.
///
/// Each entry reads `module_name: DocumentType => "/path", "/path/reset"`. Document types and
/// the tag constant are resolved in the invoking module.
///
/// ```rust,ignore
/// lobby_kernel::singleton_routes! {
///     tag = THEME_TAG;
///     navbar_color: NavbarColor => "/navbar-color", "/navbar-color/reset";
/// }
/// ```
#[cfg(feature = "server")]
#[macro_export]
macro_rules! singleton_routes {
    (tag = $tag:ident; $( $name:ident : $doc:ident => $path:tt, $reset:tt; )+) => {
        $(
            pub mod $name {
                #[allow(unused_imports)]
                use super::*;
                use ::axum::Json;
                use ::axum::extract::State;
                use $crate::server::{AdminSession, ApiError, ErrorBody, Payload};
                use $crate::singleton::{Patch, store};

                /// Returns the document, seeding defaults on first read.
                #[$crate::derive::api_handler(
                    get,
                    path = $path,
                    operation_id = concat!("get_", stringify!($name)),
                    responses(
                        (status = OK, description = "Current document", body = $doc),
                        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ErrorBody),
                    ),
                    tag = $tag,
                )]
                pub async fn fetch(
                    State(db): State<::lobby_database::Database>,
                ) -> Result<Json<$doc>, ApiError> {
                    Ok(Json(store::load::<$doc>(&db).await?))
                }

                /// Merges the given fields into the document (admin only).
                #[$crate::derive::api_handler(
                    put,
                    path = $path,
                    operation_id = concat!("update_", stringify!($name)),
                    request_body(content = $doc, description = "Any subset of the document's fields"),
                    responses(
                        (status = OK, description = "Merged document", body = $doc),
                        (status = BAD_REQUEST, description = "Unknown field or invalid value", body = ErrorBody),
                        (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                    ),
                    security(("bearer" = [])),
                    tag = $tag,
                )]
                pub async fn update(
                    admin: AdminSession,
                    State(db): State<::lobby_database::Database>,
                    Payload(patch): Payload<Patch>,
                ) -> Result<Json<$doc>, ApiError> {
                    Ok(Json(store::update::<$doc>(&db, patch, &admin).await?))
                }

                /// Restores the defaults (admin only).
                #[$crate::derive::api_handler(
                    post,
                    path = $reset,
                    operation_id = concat!("reset_", stringify!($name)),
                    responses(
                        (status = OK, description = "Default document", body = $doc),
                        (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                    ),
                    security(("bearer" = [])),
                    tag = $tag,
                )]
                pub async fn reset(
                    admin: AdminSession,
                    State(db): State<::lobby_database::Database>,
                ) -> Result<Json<$doc>, ApiError> {
                    Ok(Json(store::reset::<$doc>(&db, &admin).await?))
                }
            }
        )+

        /// Routes for every singleton declared in this module.
        pub fn singleton_router() -> ::utoipa_axum::router::OpenApiRouter<$crate::server::ApiState> {
            ::utoipa_axum::router::OpenApiRouter::new()
                $(
                    .routes(::utoipa_axum::routes!($name::fetch, $name::update))
                    .routes(::utoipa_axum::routes!($name::reset))
                )+
        }

        /// Every document of this module keyed by slug, seeding missing ones.
        pub async fn snapshot(
            db: &::lobby_database::Database,
        ) -> Result<::serde_json::Map<String, ::serde_json::Value>, $crate::server::ApiError> {
            let mut all = ::serde_json::Map::new();
            $(
                $crate::singleton::store::collect(
                    &mut all,
                    &$crate::singleton::store::load::<$doc>(db).await?,
                )?;
            )+
            Ok(all)
        }
    };
}
