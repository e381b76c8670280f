use super::health;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub use health::mark_started;

/// System routes (`/health`), mounted under `/api` by the server.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
