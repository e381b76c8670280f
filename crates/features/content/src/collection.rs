//! Ordered content lists with admin CRUD.
//!
//! A [`Collection`] is a table of items sharing `id`, `position`, `isActive`, `createdAt` and
//! `updatedAt`. [`store`] holds the generic operations; `collection_routes!` stamps out the
//! documented handlers for one collection.

use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use lobby_kernel::server::ApiError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;

/// Lists are sorted by `position`, ties broken by creation time.
pub(crate) const ORDER: &[&str] = &["position ASC", "createdAt ASC"];

pub trait Collection: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Editable fields accepted by create and full update.
    type Input: Send + 'static;

    const TABLE: &'static str;
    /// Singular noun for messages and logs.
    const NOUN: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// Field checks beyond what deserialization enforces.
    fn check(_input: &Self::Input) -> Result<(), Cow<'static, str>> {
        Ok(())
    }

    /// A field that must be unique across the table and its value in `input`.
    fn unique(_input: &Self::Input) -> Option<(&'static str, String)> {
        None
    }

    fn assemble(id: String, input: Self::Input, created_at: DateTime<Utc>, updated_at: DateTime<Utc>)
    -> Self;
}

/// `?active=true` keeps only active items, `?active=false` only hidden ones.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, Clone, Copy)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct ListQuery {
    /// Filter on `isActive`
    pub active: Option<bool>,
}

pub(crate) const fn active_by_default() -> bool {
    true
}

/// Keys the server owns; clients echoing a fetched item back may include them.
const SERVER_MANAGED: &[&str] = &["id", "createdAt", "updatedAt"];

/// Decodes a create or update body, skipping [`SERVER_MANAGED`] keys. Any other unknown key is
/// still a 400.
pub fn parse_input<I: DeserializeOwned>(body: Value) -> Result<I, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::bad_request("Expected a JSON object"));
    };
    fields.retain(|key, _| !SERVER_MANAGED.contains(&key.as_str()));
    serde_json::from_value(Value::Object(fields)).map_err(|err| ApiError::bad_request(err.to_string()))
}

/// Rejects blank required text fields.
pub(crate) fn required(field: &'static str, value: &str) -> Result<(), Cow<'static, str>> {
    if value.trim().is_empty() { Err(format!("`{field}` must not be empty").into()) } else { Ok(()) }
}

pub mod store {
    use super::{Collection, ORDER};
    use lobby_database::Database;
    use lobby_kernel::safe_nanoid;
    use lobby_kernel::security::resource::ResourceGuard;
    use lobby_kernel::server::{AdminSession, ApiError};
    use serde_json::Value;
    use tracing::info;

    pub async fn list<C: Collection>(db: &Database, active: Option<bool>) -> Result<Vec<C>, ApiError> {
        let filter = active.map(|active| ("isActive", Value::Bool(active)));
        Ok(db.fetch_all::<C>(C::TABLE, filter, ORDER).await?)
    }

    pub async fn get<C: Collection>(db: &Database, id: &str) -> Result<C, ApiError> {
        let key = ResourceGuard::key(id, C::TABLE)?;
        db.fetch::<C>(C::TABLE, &key).await?.ok_or_else(|| missing::<C>(&key))
    }

    pub async fn create<C: Collection>(
        db: &Database,
        input: C::Input,
        admin: &AdminSession,
    ) -> Result<C, ApiError> {
        C::check(&input).map_err(ApiError::bad_request)?;
        ensure_unique::<C>(db, &input, None).await?;

        let now = lobby_kernel::time::now();
        let item = C::assemble(safe_nanoid!(), input, now, now);
        db.create(C::TABLE, item.id(), &item).await?;

        info!(table = C::TABLE, id = item.id(), admin = %admin.id, "{} created", C::NOUN);
        Ok(item)
    }

    /// Replaces every editable field; `createdAt` is kept, `updatedAt` refreshed.
    pub async fn replace<C: Collection>(
        db: &Database,
        id: &str,
        input: C::Input,
        admin: &AdminSession,
    ) -> Result<C, ApiError> {
        let key = ResourceGuard::key(id, C::TABLE)?;
        let current = db.fetch::<C>(C::TABLE, &key).await?.ok_or_else(|| missing::<C>(&key))?;

        C::check(&input).map_err(ApiError::bad_request)?;
        ensure_unique::<C>(db, &input, Some(&key)).await?;

        let item = C::assemble(key, input, current.created_at(), lobby_kernel::time::now());
        db.upsert(C::TABLE, item.id(), &item).await?;

        info!(table = C::TABLE, id = item.id(), admin = %admin.id, "{} updated", C::NOUN);
        Ok(item)
    }

    pub async fn delete<C: Collection>(db: &Database, id: &str, admin: &AdminSession) -> Result<(), ApiError> {
        let key = ResourceGuard::key(id, C::TABLE)?;
        if !db.remove(C::TABLE, &key).await? {
            return Err(missing::<C>(&key));
        }

        info!(table = C::TABLE, id = %key, admin = %admin.id, "{} deleted", C::NOUN);
        Ok(())
    }

    /// Pre-checks the unique field for a readable 409; the unique index still guards races.
    async fn ensure_unique<C: Collection>(
        db: &Database,
        input: &C::Input,
        except: Option<&str>,
    ) -> Result<(), ApiError> {
        let Some((field, value)) = C::unique(input) else {
            return Ok(());
        };
        if db.exists_with(C::TABLE, field, value.as_str(), except).await? {
            return Err(ApiError::conflict(format!("{} with {field} `{value}` already exists", C::NOUN)));
        }
        Ok(())
    }

    fn missing<C: Collection>(key: &str) -> ApiError {
        ApiError::NotFound {
            message: format!("{} not found", C::NOUN).into(),
            context: Some(format!("{}:{key}", C::TABLE).into()),
        }
    }
}

/// Generates `list`, `get`, `create`, `update` and `delete` handlers for one collection, plus an
/// optional `upload` handler storing images under an upload namespace.
///
/// ```rust,ignore
/// collection_routes! {
///     name = sliders;
///     item = Slide, input = SlideInput;
///     tag = SLIDER_TAG;
///     paths = "/sliders", "/sliders/{id}";
///     upload = SLIDER_UPLOADS => "/sliders/upload";
/// }
/// ```
macro_rules! collection_routes {
    (
        name = $name:ident;
        item = $item:ident, input = $input:ident;
        tag = $tag:ident;
        paths = $list:tt, $one:tt;
        upload = $namespace:ident => $upload:tt;
    ) => {
        $crate::collection::collection_routes! {
            name = $name;
            item = $item, input = $input;
            tag = $tag;
            paths = $list, $one;
        }

        /// Stores an image for use in this collection and returns its public URL.
        #[api_handler(
            post,
            path = $upload,
            operation_id = concat!("upload_", stringify!($name)),
            request_body(content = ::lobby_media::UploadForm, content_type = "multipart/form-data"),
            responses(
                (status = CREATED, description = "Stored file", body = ::lobby_media::StoredUpload),
                (status = BAD_REQUEST, description = "Missing file or disallowed type", body = ErrorBody),
                (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                (status = PAYLOAD_TOO_LARGE, description = "File over the size limit", body = ErrorBody),
            ),
            security(("bearer" = [])),
            tag = $tag,
        )]
        pub async fn upload(
            admin: AdminSession,
            ::lobby_kernel::server::Slice(media): ::lobby_kernel::server::Slice<::lobby_media::MediaLibrary>,
            multipart: ::axum::extract::Multipart,
        ) -> Result<(StatusCode, Json<::lobby_media::StoredUpload>), ApiError> {
            let stored = media.accept(multipart, $namespace, ::lobby_media::UploadKind::Image).await?;
            ::tracing::debug!(admin = %admin.id, url = %stored.url, "Collection image uploaded");
            Ok((StatusCode::CREATED, Json(stored)))
        }

        /// Routes of this collection.
        pub fn router() -> ::utoipa_axum::router::OpenApiRouter<::lobby_kernel::server::ApiState> {
            crud_router().routes(::utoipa_axum::routes!(upload))
        }
    };
    (
        name = $name:ident;
        item = $item:ident, input = $input:ident;
        tag = $tag:ident;
        paths = $list:tt, $one:tt;
    ) => {
        use ::axum::Json;
        use ::axum::extract::{Path, State};
        use ::axum::http::StatusCode;
        use ::lobby_database::Database;
        use ::lobby_derive::api_handler;
        use ::lobby_kernel::server::{AdminSession, ApiError, ErrorBody, Params, Payload};
        use $crate::collection::{ListQuery, parse_input, store};

        /// Lists items in display order.
        #[api_handler(
            get,
            path = $list,
            operation_id = concat!("list_", stringify!($name)),
            params(ListQuery),
            responses(
                (status = OK, description = "Items ordered by position", body = Vec<$item>),
                (status = BAD_REQUEST, description = "Malformed query", body = ErrorBody),
            ),
            tag = $tag,
        )]
        pub async fn list(
            State(db): State<Database>,
            Params(query): Params<ListQuery>,
        ) -> Result<Json<Vec<$item>>, ApiError> {
            Ok(Json(store::list::<$item>(&db, query.active).await?))
        }

        #[api_handler(
            get,
            path = $one,
            operation_id = concat!("get_", stringify!($name)),
            params(("id" = String, Path, description = "Item id")),
            responses(
                (status = OK, description = "The item", body = $item),
                (status = NOT_FOUND, description = "Unknown id", body = ErrorBody),
            ),
            tag = $tag,
        )]
        pub async fn get(State(db): State<Database>, Path(id): Path<String>) -> Result<Json<$item>, ApiError> {
            Ok(Json(store::get::<$item>(&db, &id).await?))
        }

        #[api_handler(
            post,
            path = $list,
            operation_id = concat!("create_", stringify!($name)),
            request_body = $input,
            responses(
                (status = CREATED, description = "Created item", body = $item),
                (status = BAD_REQUEST, description = "Invalid fields", body = ErrorBody),
                (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                (status = CONFLICT, description = "Unique field already used", body = ErrorBody),
            ),
            security(("bearer" = [])),
            tag = $tag,
        )]
        pub async fn create(
            admin: AdminSession,
            State(db): State<Database>,
            Payload(body): Payload<::serde_json::Value>,
        ) -> Result<(StatusCode, Json<$item>), ApiError> {
            let input = parse_input::<$input>(body)?;
            let item = store::create::<$item>(&db, input, &admin).await?;
            Ok((StatusCode::CREATED, Json(item)))
        }

        #[api_handler(
            put,
            path = $one,
            operation_id = concat!("update_", stringify!($name)),
            params(("id" = String, Path, description = "Item id")),
            request_body = $input,
            responses(
                (status = OK, description = "Updated item", body = $item),
                (status = BAD_REQUEST, description = "Invalid fields", body = ErrorBody),
                (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                (status = NOT_FOUND, description = "Unknown id", body = ErrorBody),
                (status = CONFLICT, description = "Unique field already used", body = ErrorBody),
            ),
            security(("bearer" = [])),
            tag = $tag,
        )]
        pub async fn update(
            admin: AdminSession,
            State(db): State<Database>,
            Path(id): Path<String>,
            Payload(body): Payload<::serde_json::Value>,
        ) -> Result<Json<$item>, ApiError> {
            let input = parse_input::<$input>(body)?;
            Ok(Json(store::replace::<$item>(&db, &id, input, &admin).await?))
        }

        #[api_handler(
            delete,
            path = $one,
            operation_id = concat!("delete_", stringify!($name)),
            params(("id" = String, Path, description = "Item id")),
            responses(
                (status = NO_CONTENT, description = "Deleted"),
                (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
                (status = NOT_FOUND, description = "Unknown id", body = ErrorBody),
            ),
            security(("bearer" = [])),
            tag = $tag,
        )]
        pub async fn delete(
            admin: AdminSession,
            State(db): State<Database>,
            Path(id): Path<String>,
        ) -> Result<StatusCode, ApiError> {
            store::delete::<$item>(&db, &id, &admin).await?;
            Ok(StatusCode::NO_CONTENT)
        }

        fn crud_router() -> ::utoipa_axum::router::OpenApiRouter<::lobby_kernel::server::ApiState> {
            ::utoipa_axum::router::OpenApiRouter::new()
                .routes(::utoipa_axum::routes!(list, create))
                .routes(::utoipa_axum::routes!(get, update, delete))
        }
    };
}

pub(crate) use collection_routes;
