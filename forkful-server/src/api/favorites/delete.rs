use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteFavoriteResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{user_id}/{recipe_id}",
    tag = "favorites",
    params(
        ("user_id" = String, Path, description = "Opaque user identifier"),
        ("recipe_id" = i32, Path, description = "Catalog recipe id")
    ),
    responses(
        (status = 200, description = "Removed (or was already absent)", body = DeleteFavoriteResponse),
        (status = 400, description = "recipe_id is not an integer", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn delete_favorite(
    State(store): State<AppState>,
    Path((user_id, recipe_id)): Path<(String, i32)>,
) -> impl IntoResponse {
    match store.remove(&user_id, recipe_id).await {
        Ok(removed) => {
            // Idempotent by design: absence is still a successful removal.
            if !removed {
                tracing::debug!(%user_id, recipe_id, "no favorite row matched delete");
            }
            (
                StatusCode::OK,
                Json(DeleteFavoriteResponse {
                    message: "Favorite removed successfully".to_string(),
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(%error, %user_id, recipe_id, "failed to remove favorite");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Something went wrong".to_string(),
                }),
            )
                .into_response()
        }
    }
}
