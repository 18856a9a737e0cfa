pub mod api;
pub mod db;
pub mod models;
pub mod schema;
pub mod store;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use utoipa_swagger_ui::SwaggerUi;

use crate::store::FavoritesStore;

/// Application state shared across all handlers
pub type AppState = Arc<dyn FavoritesStore>;

/// Build the full application router over any [`FavoritesStore`].
///
/// Kept separate from `main` so integration tests can drive the router
/// in-process against a [`store::MemoryStore`].
pub fn app(store: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .route("/api/health", get(api::health::health))
        .nest("/api/favorites", api::favorites::router())
        .merge(swagger_ui)
        .with_state(store)
}
