use crate::api::ErrorResponse;
use crate::models::Favorite;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/favorites/{user_id}",
    tag = "favorites",
    params(
        ("user_id" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "The user's favorites, possibly empty", body = [Favorite]),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn list_favorites(
    State(store): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match store.list_by_user(&user_id).await {
        Ok(favorites) => (StatusCode::OK, Json(favorites)).into_response(),
        Err(error) => {
            tracing::error!(%error, %user_id, "failed to list favorites");
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
