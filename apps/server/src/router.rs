use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::any;
use lobby::domain::config::ApiConfig;
use lobby::domain::constants::UPLOADS_ROUTE;
use lobby::kernel::prelude::{ApiError, ApiState};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{ComponentsBuilder, OpenApi as OpenApiDoc};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Lobby API", description = "Site content, theming and media for the Lobby frontend"),
    modifiers(&BearerAuth)
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        let components = openapi.components.get_or_insert_with(|| ComponentsBuilder::new().build());
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build(),
            ),
        );
    }
}

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let config = state.config.clone();
    let uploads_root = state.storage.root().to_path_buf();

    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", lobby::api_router())
        .split_for_parts();

    let api_routes = api_routes
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
        .with_state(state);

    let static_dir = &config.storage.static_dir;
    let spa = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", api_doc))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(uploads_root))
        .fallback_service(spa)
        .layer(DefaultBodyLimit::max(config.uploads.max_file_size + MULTIPART_OVERHEAD))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
}

/// Unknown API paths answer with the JSON error envelope instead of the SPA shell.
async fn api_not_found() -> impl IntoResponse {
    ApiError::not_found("No such API endpoint")
}

/// Any origin when `server.cors_origins` is empty, otherwise exactly the listed ones.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origins = &config.server.cors_origins;

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(%origin, "Ignoring malformed CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[test]
    fn cors_accepts_listed_and_wildcard_origins() {
        let mut config = ApiConfig::default();
        let _any = cors_layer(&config);

        config.server.cors_origins = vec!["https://casino.example".to_owned(), "bad\norigin".to_owned()];
        let _listed = cors_layer(&config);
    }
}
