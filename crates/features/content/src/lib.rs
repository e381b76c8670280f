//! Content slice: what the public site shows besides its theme.
//!
//! * [`site`]: the `site-settings` and `footer` singletons, plus logo and favicon uploads.
//! * [`slides`], [`promotions`], [`banners`], [`notices`]: ordered collections with public
//!   listing and admin CRUD; the first three also accept image uploads.

pub mod banners;
pub mod collection;
pub mod notices;
pub mod promotions;
pub mod site;
pub mod slides;

pub use crate::banners::{Banner, BannerInput, Placement};
pub use crate::collection::{Collection, ListQuery};
pub use crate::notices::{Notice, NoticeInput};
pub use crate::promotions::{Promotion, PromotionInput};
pub use crate::site::{Footer, FooterLink, SiteSettings, SocialLink};
pub use crate::slides::{Slide, SlideInput};

use lobby_database::Migration;
use lobby_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;

const SLICE: &str = "content";

const SCHEMA_V1: &str = r"
DEFINE TABLE IF NOT EXISTS site_settings SCHEMALESS;
DEFINE TABLE IF NOT EXISTS footer SCHEMALESS;
DEFINE TABLE IF NOT EXISTS slide SCHEMALESS;
DEFINE TABLE IF NOT EXISTS promotion SCHEMALESS;
DEFINE INDEX IF NOT EXISTS promotion_slug ON TABLE promotion FIELDS slug UNIQUE;
DEFINE TABLE IF NOT EXISTS banner SCHEMALESS;
DEFINE TABLE IF NOT EXISTS notice SCHEMALESS;
";

/// Schema owned by this slice.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(SLICE, "0001_content", SCHEMA_V1)]
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .merge(site::router())
        .merge(slides::router())
        .merge(promotions::router())
        .merge(banners::router())
        .merge(notices::router())
}
