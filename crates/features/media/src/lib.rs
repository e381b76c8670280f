//! Media slice: turns multipart uploads into stored, content-addressed files.
//!
//! Every upload endpoint in the API goes through [`MediaLibrary::accept`]: it picks the `file`
//! (or `image`) part, enforces the size limit while streaming, checks the extension against the
//! endpoint's [`UploadKind`] allow-list, names the file after the SHA-256 of its bytes and writes
//! it once into the namespace. Identical uploads therefore share one file.

mod error;
mod kind;

pub use crate::error::{MediaError, MediaErrorExt};
pub use crate::kind::UploadKind;

use axum::body::Bytes;
use axum::extract::Multipart;
use lobby_derive::api_model;
use lobby_domain::config::ApiConfig;
use lobby_domain::constants::UPLOADS_ROUTE;
use lobby_kernel::domain::registry::InitializedSlice;
use lobby_storage::Storage;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Multipart part names accepted as the uploaded file.
const FILE_FIELDS: &[&str] = &["file", "image"];

/// Media feature state.
#[lobby_derive::lobby_slice]
pub struct MediaLibrary {
    storage: Storage,
    max_file_size: usize,
    public_url: String,
}

/// A file received from a client, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Where an accepted upload can be fetched.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Public URL of the stored file
    pub url: String,
    /// Stored file name (`<sha256>.<ext>`)
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type derived from the extension
    pub content_type: String,
}

/// Multipart body accepted by upload endpoints; only used for API documentation.
#[cfg(feature = "server")]
#[derive(utoipa::ToSchema)]
pub struct UploadForm {
    /// The file itself (`image` is accepted as an alias)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Initialize the media feature.
pub fn init(config: &ApiConfig, storage: Storage) -> Result<InitializedSlice, MediaError> {
    let slice = MediaLibrary::new(MediaLibraryInner {
        storage,
        max_file_size: config.uploads.max_file_size,
        public_url: config.storage.public_url.trim_end_matches('/').to_owned(),
    });
    info!(max_file_size = config.uploads.max_file_size, "Media server slice initialized");

    Ok(InitializedSlice::new(slice))
}

impl MediaLibrary {
    /// Reads the upload from `multipart` and stores it under `namespace`.
    pub async fn accept(
        &self,
        mut multipart: Multipart,
        namespace: &'static str,
        kind: UploadKind,
    ) -> Result<StoredUpload, MediaError> {
        let file = self.receive(&mut multipart).await?;
        self.store(namespace, kind, file).await
    }

    /// Pulls the first `file`/`image` part, aborting as soon as it exceeds the size limit.
    pub async fn receive(&self, multipart: &mut Multipart) -> Result<IncomingFile, MediaError> {
        while let Some(mut field) = multipart.next_field().await? {
            if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_owned();
            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if data.len() + chunk.len() > self.max_file_size {
                    return Err(MediaError::TooLarge {
                        message: format!("Files are limited to {} bytes", self.max_file_size).into(),
                        context: Some(file_name.into()),
                    });
                }
                data.extend_from_slice(&chunk);
            }

            return Ok(IncomingFile { file_name, bytes: Bytes::from(data) });
        }

        Err(MediaError::rejected("Missing `file` part"))
    }

    /// Validates `file` against `kind` and writes it under its content hash.
    pub async fn store(
        &self,
        namespace: &'static str,
        kind: UploadKind,
        file: IncomingFile,
    ) -> Result<StoredUpload, MediaError> {
        if file.bytes.is_empty() {
            return Err(MediaError::rejected("Uploaded file is empty"));
        }
        if file.bytes.len() > self.max_file_size {
            return Err(MediaError::TooLarge {
                message: format!("Files are limited to {} bytes", self.max_file_size).into(),
                context: None,
            });
        }

        let extension = kind::extension(&file.file_name)
            .ok_or_else(|| MediaError::rejected("File name has no extension"))?;
        if !kind.allows(&extension) {
            return Err(MediaError::rejected(format!(
                "File type `.{extension}` is not allowed; expected one of: {}",
                kind.extensions().join(", ")
            )));
        }

        let file_name = format!("{}.{extension}", hex::encode(Sha256::digest(&file.bytes)));
        let stored = self.storage.namespace(namespace)?.write_once(&file_name, &file.bytes).await?;

        if stored.created {
            info!(namespace, file = %file_name, size = stored.size, "Upload stored");
        } else {
            debug!(namespace, file = %file_name, "Upload matched an existing file");
        }

        Ok(StoredUpload {
            url: format!("{}{UPLOADS_ROUTE}/{}", self.public_url, stored.url_path()),
            file_name,
            size: stored.size,
            content_type: kind::content_type(&extension).to_owned(),
        })
    }
}
