//! Promotions with a unique URL slug and an optional validity window.

use crate::collection::{Collection, active_by_default, collection_routes, required};
use chrono::{DateTime, Utc};
use lobby_derive::api_model;
use lobby_domain::constants::{PROMOTION_TABLE, PROMOTION_TAG, PROMOTION_UPLOADS};
use std::borrow::Cow;

const SLUG_MAX: usize = 96;

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    /// Unique, lowercase `[a-z0-9-]`
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub badge: String,
    #[serde(default, with = "lobby_kernel::time::rfc3339_option", skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lobby_kernel::time::rfc3339_option", skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub position: i32,
    pub is_active: bool,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "lobby_kernel::time::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

#[api_model]
#[derive(Clone)]
pub struct PromotionInput {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link_url: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

pub(crate) fn check_slug(slug: &str) -> Result<(), Cow<'static, str>> {
    let valid = !slug.is_empty()
        && slug.len() <= SLUG_MAX
        && slug.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(format!("`slug` must be 1-{SLUG_MAX} characters of a-z, 0-9 or '-'").into())
    }
}

impl Collection for Promotion {
    type Input = PromotionInput;

    const TABLE: &'static str = PROMOTION_TABLE;
    const NOUN: &'static str = "Promotion";

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn check(input: &PromotionInput) -> Result<(), Cow<'static, str>> {
        required("title", &input.title)?;
        check_slug(&input.slug)?;
        if let (Some(starts), Some(ends)) = (input.starts_at, input.ends_at)
            && ends < starts
        {
            return Err("`endsAt` must not precede `startsAt`".into());
        }
        Ok(())
    }

    fn unique(input: &PromotionInput) -> Option<(&'static str, String)> {
        Some(("slug", input.slug.clone()))
    }

    fn assemble(id: String, input: PromotionInput, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title.trim().to_owned(),
            slug: input.slug,
            description: input.description,
            image_url: input.image_url,
            link_url: input.link_url,
            badge: input.badge,
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            position: input.position,
            is_active: input.is_active,
            created_at,
            updated_at,
        }
    }
}

collection_routes! {
    name = promotions;
    item = Promotion, input = PromotionInput;
    tag = PROMOTION_TAG;
    paths = "/promotions", "/promotions/{id}";
    upload = PROMOTION_UPLOADS => "/promotions/upload";
}
