//! Site-wide settings and the footer, plus branding uploads.

use lobby_derive::{api_handler, api_model, singleton};
use lobby_domain::constants::{BRANDING_UPLOADS, SITE_TAG};
use std::borrow::Cow;

/// Name, branding and SEO defaults of the public site.
#[singleton(table = "site_settings", slug = "site-settings")]
pub struct SiteSettings {
    #[default("Lobby")]
    pub site_name: String,
    pub tagline: String,
    /// Set by `POST /site-settings/upload-logo`
    pub logo_url: String,
    /// Set by `POST /site-settings/upload-favicon`
    pub favicon_url: String,
    pub meta_title: String,
    pub meta_description: String,
    pub contact_email: String,
    pub telegram_url: String,
    pub maintenance_mode: bool,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct SocialLink {
    /// e.g. `telegram`, `x`, `instagram`; stored as given, blanks included
    pub platform: String,
    pub url: String,
}

#[singleton(table = "footer", slug = "footer", validate = check_footer)]
pub struct Footer {
    pub description: String,
    #[default("© Lobby. 18+ Play responsibly.")]
    pub copyright: String,
    pub links: Vec<FooterLink>,
    pub socials: Vec<SocialLink>,
    #[default(true)]
    pub is_active: bool,
}

fn check_footer(footer: &Footer) -> Result<(), Cow<'static, str>> {
    if let Some(index) = footer
        .links
        .iter()
        .position(|link| link.label.trim().is_empty() || link.url.trim().is_empty())
    {
        return Err(format!("links[{index}] needs a label and a url").into());
    }
    Ok(())
}

lobby_kernel::singleton_routes! {
    tag = SITE_TAG;
    site_settings: SiteSettings => "/site-settings", "/site-settings/reset";
    footer: Footer => "/footer", "/footer/reset";
}

pub mod branding {
    //! Logo and favicon uploads; the stored URL is written into [`SiteSettings`].

    use super::{BRANDING_UPLOADS, SITE_TAG, SiteSettings, api_handler};
    use axum::Json;
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use lobby_database::Database;
    use lobby_kernel::server::{AdminSession, ApiError, ErrorBody, Slice};
    use lobby_kernel::singleton::store;
    use lobby_media::{MediaLibrary, StoredUpload, UploadForm, UploadKind};
    use serde_json::{Map, Value};

    async fn brand(
        db: &Database,
        media: &MediaLibrary,
        multipart: Multipart,
        kind: UploadKind,
        field: &'static str,
        admin: &AdminSession,
    ) -> Result<StoredUpload, ApiError> {
        let stored = media.accept(multipart, BRANDING_UPLOADS, kind).await?;
        let patch = Map::from_iter([(field.to_owned(), Value::String(stored.url.clone()))]);
        store::update::<SiteSettings>(db, Value::Object(patch), admin).await?;
        Ok(stored)
    }

    /// Stores a new logo and points `logoUrl` at it.
    #[api_handler(
        post,
        path = "/site-settings/upload-logo",
        request_body(content = UploadForm, content_type = "multipart/form-data"),
        responses(
            (status = CREATED, description = "Stored logo", body = StoredUpload),
            (status = BAD_REQUEST, description = "Missing file or disallowed type", body = ErrorBody),
            (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
            (status = PAYLOAD_TOO_LARGE, description = "File over the size limit", body = ErrorBody),
        ),
        security(("bearer" = [])),
        tag = SITE_TAG,
    )]
    pub async fn upload_logo(
        admin: AdminSession,
        State(db): State<Database>,
        Slice(media): Slice<MediaLibrary>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<StoredUpload>), ApiError> {
        let stored = brand(&db, &media, multipart, UploadKind::Image, "logoUrl", &admin).await?;
        Ok((StatusCode::CREATED, Json(stored)))
    }

    /// Stores a new favicon and points `faviconUrl` at it.
    #[api_handler(
        post,
        path = "/site-settings/upload-favicon",
        request_body(content = UploadForm, content_type = "multipart/form-data"),
        responses(
            (status = CREATED, description = "Stored favicon", body = StoredUpload),
            (status = BAD_REQUEST, description = "Missing file or disallowed type", body = ErrorBody),
            (status = UNAUTHORIZED, description = "Missing or invalid token", body = ErrorBody),
            (status = PAYLOAD_TOO_LARGE, description = "File over the size limit", body = ErrorBody),
        ),
        security(("bearer" = [])),
        tag = SITE_TAG,
    )]
    pub async fn upload_favicon(
        admin: AdminSession,
        State(db): State<Database>,
        Slice(media): Slice<MediaLibrary>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<StoredUpload>), ApiError> {
        let stored = brand(&db, &media, multipart, UploadKind::Icon, "faviconUrl", &admin).await?;
        Ok((StatusCode::CREATED, Json(stored)))
    }
}

/// Singleton and branding routes.
pub fn router() -> utoipa_axum::router::OpenApiRouter<lobby_kernel::server::ApiState> {
    singleton_router()
        .routes(utoipa_axum::routes!(branding::upload_logo))
        .routes(utoipa_axum::routes!(branding::upload_favicon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_footer_links_need_label_and_url() {
        let mut footer = Footer::default();
        assert!(check_footer(&footer).is_ok());

        footer.links.push(FooterLink { label: "Terms".into(), url: "/terms".into() });
        footer.links.push(FooterLink { label: " ".into(), url: "/privacy".into() });
        assert_eq!(check_footer(&footer).unwrap_err(), "links[1] needs a label and a url");

        footer.links.pop();
        footer.socials.push(SocialLink { platform: "telegram".into(), url: String::new() });
        assert!(check_footer(&footer).is_ok());
    }
}
