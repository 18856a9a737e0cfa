pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete as axum_delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/favorites endpoints (mounted at /api/favorites)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_favorite))
        .route("/{user_id}", get(list::list_favorites))
        .route(
            "/{user_id}/{recipe_id}",
            axum_delete(delete::delete_favorite),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_favorite,
        list::list_favorites,
        delete::delete_favorite,
    ),
    components(schemas(
        create::CreateFavoriteRequest,
        create::RecipeId,
        delete::DeleteFavoriteResponse,
        crate::models::Favorite,
    ))
)]
pub struct ApiDoc;
