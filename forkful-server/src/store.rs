//! Favorites persistence boundary.
//!
//! Handlers depend on the [`FavoritesStore`] trait so tests can drive the
//! full router against [`MemoryStore`]. The production [`DieselStore`] leans
//! on the database's unique `(user_id, recipe_id)` index for race-free
//! duplicate rejection; no in-process locking is involved.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::db::DbPool;
use crate::models::{Favorite, NewFavoriteRow};
use crate::schema::favorites;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or blank; user-correctable.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The (user, recipe) pair is already favorited.
    #[error("favorite already exists for this user and recipe")]
    Duplicate,

    /// Storage engine failure; the detail is for server-side logs only.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Fields for a new favorite. `recipe_id` is already an integer by the time
/// it reaches the store; the API layer owns the string-to-integer conversion.
#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    pub image: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<i32>,
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Insert a favorite and return the persisted row. A unique-pair
    /// violation surfaces as [`StoreError::Duplicate`], not a generic failure.
    async fn add(&self, favorite: NewFavorite) -> Result<Favorite, StoreError>;

    /// All favorites for a user, storage-default order.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError>;

    /// Delete the row for the unique pair. Idempotent: returns whether a row
    /// was actually removed; removing a non-existent pair is not an error.
    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<bool, StoreError>;
}

fn validate(favorite: &NewFavorite) -> Result<(), StoreError> {
    if favorite.user_id.trim().is_empty() {
        return Err(StoreError::MissingField("userId"));
    }
    if favorite.title.trim().is_empty() {
        return Err(StoreError::MissingField("title"));
    }
    Ok(())
}

/// Production store backed by the Postgres pool.
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        self.pool
            .get()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

#[async_trait]
impl FavoritesStore for DieselStore {
    async fn add(&self, favorite: NewFavorite) -> Result<Favorite, StoreError> {
        validate(&favorite)?;
        let mut conn = self.conn()?;

        let row = NewFavoriteRow {
            user_id: &favorite.user_id,
            recipe_id: favorite.recipe_id,
            title: &favorite.title,
            image: favorite.image.as_deref(),
            cook_time: favorite.cook_time.as_deref(),
            servings: favorite.servings,
        };

        diesel::insert_into(favorites::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StoreError::Duplicate
                }
                other => StoreError::Storage(other.to_string()),
            })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError> {
        let mut conn = self.conn()?;
        favorites::table
            .filter(favorites::user_id.eq(user_id))
            .select(Favorite::as_select())
            .load(&mut conn)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        Ok(deleted > 0)
    }
}

/// In-memory store upholding the same invariants, for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    rows: Vec<Favorite>,
    next_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn add(&self, favorite: NewFavorite) -> Result<Favorite, StoreError> {
        validate(&favorite)?;
        let mut inner = self.inner.lock().unwrap();

        if inner
            .rows
            .iter()
            .any(|r| r.user_id == favorite.user_id && r.recipe_id == favorite.recipe_id)
        {
            return Err(StoreError::Duplicate);
        }

        inner.next_id += 1;
        let row = Favorite {
            id: inner.next_id,
            user_id: favorite.user_id,
            recipe_id: favorite.recipe_id,
            title: favorite.title,
            image: favorite.image,
            cook_time: favorite.cook_time,
            servings: favorite.servings,
            created_at: Utc::now(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn remove(&self, user_id: &str, recipe_id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner
            .rows
            .retain(|r| !(r.user_id == user_id && r.recipe_id == recipe_id));
        Ok(inner.rows.len() < before)
    }
}
