//! Theme slice: the color and sizing documents the public site styles itself with.
//!
//! Every component has one singleton document (see [`models`]) exposed at `/<slug>` with
//! `GET`, `PUT` (partial merge, admin only) and `POST /<slug>/reset`. `GET /theme` returns all
//! of them at once so the site can style itself with a single request.

mod color;
pub mod models;
pub mod routes;

pub use crate::color::Color;
pub use crate::routes::snapshot;

use axum::Json;
use axum::extract::State;
use lobby_database::{Database, Migration};
use lobby_derive::api_handler;
use lobby_domain::constants::THEME_TAG;
use lobby_kernel::server::{ApiError, ApiState, ErrorBody};
use serde_json::{Map, Value};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SLICE: &str = "theme";

const SCHEMA_V1: &str = r"
DEFINE TABLE IF NOT EXISTS navbar_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS topbar_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS mobile_menu_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS sidebar_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS footer_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS banner_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS slider_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS notice_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS promotion_card_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS casino_card_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS ranking_table_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS rating_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS button_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS body_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS tab_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS pagination_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS search_bar_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS badge_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS modal_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS input_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS toast_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS floating_button_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS scrollbar_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS login_form_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS review_page_color SCHEMALESS;
DEFINE TABLE IF NOT EXISTS affiliate_dashboard_color SCHEMALESS;
";

/// Every theme document keyed by slug; missing ones are seeded with defaults.
#[api_handler(
    get,
    path = "/theme",
    responses(
        (status = OK, description = "Theme documents keyed by slug", body = Object),
        (status = INTERNAL_SERVER_ERROR, description = "Storage failure", body = ErrorBody),
    ),
    tag = THEME_TAG,
)]
pub async fn theme(State(db): State<Database>) -> Result<Json<Map<String, Value>>, ApiError> {
    Ok(Json(snapshot(&db).await?))
}

/// Schema owned by this slice.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(SLICE, "0001_theme_tables", SCHEMA_V1)]
}

pub fn router() -> OpenApiRouter<ApiState> {
    tracing::debug!("Mounting theme routes");
    crate::routes::singleton_router().routes(routes!(theme))
}
