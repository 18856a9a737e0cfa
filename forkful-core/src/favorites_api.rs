//! Client for the favorites persistence API.
//!
//! The [`FavoritesApi`] trait is the seam the sync controller drives; the
//! reqwest-backed [`HttpFavoritesApi`] talks to a running forkful-server,
//! while [`MockFavoritesApi`] provides scripted outcomes for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{FavoriteRecord, NewFavorite};

#[async_trait]
pub trait FavoritesApi: Send + Sync {
    /// Persist a favorite. A conflict (already favorited) surfaces as a
    /// non-2xx [`ApiError::Status`].
    async fn add(&self, favorite: &NewFavorite) -> Result<(), ApiError>;

    /// All favorites for a user, possibly empty.
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, ApiError>;

    /// Remove the favorite for a (user, recipe) pair. Idempotent server-side.
    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<(), ApiError>;
}

/// Production client for the forkful-server HTTP API.
pub struct HttpFavoritesApi {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpFavoritesApi {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            inner: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl FavoritesApi for HttpFavoritesApi {
    async fn add(&self, favorite: &NewFavorite) -> Result<(), ApiError> {
        let response = self
            .inner
            .post(format!("{}/favorites", self.base_url))
            .json(favorite)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, ApiError> {
        let response = self
            .inner
            .get(format!("{}/favorites/{user_id}", self.base_url))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidPayload(e.to_string()))
    }

    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<(), ApiError> {
        let response = self
            .inner
            .delete(format!("{}/favorites/{user_id}/{recipe_id}", self.base_url))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// In-memory favorites API with switchable failure modes, for tests.
#[derive(Default)]
pub struct MockFavoritesApi {
    favorites: Mutex<Vec<FavoriteRecord>>,
    fail_add: AtomicBool,
    fail_remove: AtomicBool,
    fail_list: AtomicBool,
}

impl MockFavoritesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing favorite.
    pub fn with_favorite(self, record: FavoriteRecord) -> Self {
        self.favorites.lock().unwrap().push(record);
        self
    }

    pub fn set_fail_add(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything currently stored, across all users.
    pub fn stored(&self) -> Vec<FavoriteRecord> {
        self.favorites.lock().unwrap().clone()
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: 500,
            body: r#"{"error":"Something went wrong"}"#.to_string(),
        }
    }
}

#[async_trait]
impl FavoritesApi for MockFavoritesApi {
    async fn add(&self, favorite: &NewFavorite) -> Result<(), ApiError> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        let mut favorites = self.favorites.lock().unwrap();
        if favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.recipe_id == favorite.recipe_id)
        {
            return Err(ApiError::Status {
                status: 409,
                body: r#"{"error":"Recipe is already in favorites"}"#.to_string(),
            });
        }
        favorites.push(FavoriteRecord {
            user_id: favorite.user_id.clone(),
            recipe_id: favorite.recipe_id,
            title: favorite.title.clone(),
            image: favorite.image.clone(),
            cook_time: favorite.cook_time.clone(),
            servings: favorite.servings,
        });
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, ApiError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<(), ApiError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        self.favorites
            .lock()
            .unwrap()
            .retain(|f| !(f.user_id == user_id && f.recipe_id == recipe_id));
        Ok(())
    }
}
