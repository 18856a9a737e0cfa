pub mod catalog;
pub mod error;
pub mod favorites_api;
pub mod normalize;
pub mod sync;
pub mod types;

pub use catalog::{
    CategoryRecord, HttpClient, MealCatalog, MockClient, ReqwestClient, DEFAULT_BASE_URL,
};
pub use error::{ApiError, CatalogError};
pub use favorites_api::{FavoritesApi, HttpFavoritesApi, MockFavoritesApi};
pub use normalize::normalize;
pub use sync::{CheckState, ChecklistState, SaveState, SyncController, ToggleError};
pub use types::{FavoriteRecord, NewFavorite, RawMealRecord, Recipe};
