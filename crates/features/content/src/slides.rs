//! Hero slider items.

use crate::collection::{Collection, active_by_default, collection_routes, required};
use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use lobby_domain::constants::{SLIDER_TAG, SLIDER_UPLOADS, SLIDE_TABLE};
use std::borrow::Cow;

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: String,
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub link_url: String,
    pub button_text: String,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

#[api_model]
#[derive(Clone)]
pub struct SlideInput {
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Collection for Slide {
    type Input = SlideInput;

    const TABLE: &'static str = SLIDE_TABLE;
    const NOUN: &'static str = "Slide";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn check(input: &SlideInput) -> Result<(), Cow<'static, str>> {
        required("imageUrl", &input.image_url)
    }

    fn assemble(id: String, input: SlideInput, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            image_url: input.image_url.trim().to_owned(),
            title: input.title,
            subtitle: input.subtitle,
            link_url: input.link_url,
            button_text: input.button_text,
            position: input.position,
            is_active: input.is_active,
            created_at,
            updated_at,
        }
    }
}

collection_routes! {
    name = sliders;
    item = Slide, input = SlideInput;
    tag = SLIDER_TAG;
    paths = "/sliders", "/sliders/{id}";
    upload = SLIDER_UPLOADS => "/sliders/upload";
}
