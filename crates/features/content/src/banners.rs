//! Image banners placed in fixed page slots.

use crate::collection::{Collection, active_by_default, collection_routes, required};
use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use lobby_domain::constants::{BANNER_TABLE, BANNER_TAG, BANNER_UPLOADS};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Page slot a banner is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum Placement {
    #[default]
    Home,
    Sidebar,
    Review,
    Footer,
}

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    pub placement: Placement,
    pub title: String,
    pub link_url: String,
    pub alt_text: String,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

#[api_model]
#[derive(Clone)]
pub struct BannerInput {
    pub image_url: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Collection for Banner {
    type Input = BannerInput;

    const TABLE: &'static str = BANNER_TABLE;
    const NOUN: &'static str = "Banner";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn check(input: &BannerInput) -> Result<(), Cow<'static, str>> {
        required("imageUrl", &input.image_url)
    }

    fn assemble(id: String, input: BannerInput, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            image_url: input.image_url.trim().to_owned(),
            placement: input.placement,
            title: input.title,
            link_url: input.link_url,
            alt_text: input.alt_text,
            position: input.position,
            is_active: input.is_active,
            created_at,
            updated_at,
        }
    }
}

collection_routes! {
    name = banners;
    item = Banner, input = BannerInput;
    tag = BANNER_TAG;
    paths = "/banners", "/banners/{id}";
    upload = BANNER_UPLOADS => "/banners/upload";
}
