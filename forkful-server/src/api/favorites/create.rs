use crate::api::ErrorResponse;
use crate::models::Favorite;
use crate::store::{NewFavorite, StoreError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

/// The catalog emits recipe ids as strings while the store keys them as
/// integers; accept both JSON shapes and reject anything non-numeric.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i32),
    Text(String),
}

impl RecipeId {
    fn as_i32(&self) -> Option<i32> {
        match self {
            RecipeId::Number(n) => Some(*n),
            RecipeId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// All fields optional so that absence maps to a 400 with the documented
/// message instead of a serde rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub servings: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "favorites",
    request_body = CreateFavoriteRequest,
    responses(
        (status = 201, description = "Favorite created successfully", body = Favorite),
        (status = 400, description = "Missing or malformed required fields", body = ErrorResponse),
        (status = 409, description = "Recipe is already in favorites", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn create_favorite(
    State(store): State<AppState>,
    Json(request): Json<CreateFavoriteRequest>,
) -> impl IntoResponse {
    let (Some(user_id), Some(recipe_id), Some(title)) =
        (request.user_id, request.recipe_id, request.title)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required fields".to_string(),
            }),
        )
            .into_response();
    };

    let Some(recipe_id) = recipe_id.as_i32() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "recipeId must be numeric".to_string(),
            }),
        )
            .into_response();
    };

    let favorite = NewFavorite {
        user_id,
        recipe_id,
        title,
        image: request.image,
        cook_time: request.cook_time,
        servings: request.servings,
    };

    match store.add(favorite).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(StoreError::MissingField(field)) => {
            tracing::debug!(field, "favorite create rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing required fields".to_string(),
                }),
            )
                .into_response()
        }
        Err(StoreError::Duplicate) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Recipe is already in favorites".to_string(),
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "failed to create favorite");
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
