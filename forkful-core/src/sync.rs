//! Client-side sync state for the recipe detail screen.
//!
//! [`SyncController`] runs the optimistic toggle state machine that keeps a
//! recipe's local "is-favorited" view consistent with the server despite
//! network latency and failure. One controller is scoped to one recipe on one
//! screen instance; a late response can never leak into another recipe's
//! state because the controller refuses work for a mismatched recipe id.
//!
//! [`ChecklistState`] tracks per-item check-off for ingredients and
//! instruction steps, keyed by stable item identity rather than array
//! position so the map cannot drift when list contents change.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::favorites_api::FavoritesApi;
use crate::types::{NewFavorite, Recipe};

/// Saved/unsaved view of the current recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Initial state, before the existing-favorite check completes.
    Unknown,
    Unsaved,
    Saved,
    /// An add request is in flight; the toggle control is disabled.
    Saving,
    /// A delete request is in flight; the toggle control is disabled.
    Removing,
}

impl SaveState {
    /// True while a toggle request is outstanding.
    pub fn is_busy(self) -> bool {
        matches!(self, SaveState::Saving | SaveState::Removing)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToggleError {
    /// A toggle for this recipe is already in flight; the control is disabled.
    #[error("a toggle request for this recipe is already in flight")]
    InFlight,

    /// The recipe handed to `toggle` is not the one this controller is scoped to.
    #[error("recipe does not match this controller")]
    RecipeMismatch,

    /// The recipe id is not numeric and cannot match the store's integer key.
    #[error("recipe id is not numeric")]
    InvalidRecipeId,

    /// The request failed and local state was reverted. The message is the
    /// generic retry-prompting alert shown to the user.
    #[error("Something went wrong. Please try again.")]
    Failed,
}

/// Optimistic toggle state machine for a single recipe.
pub struct SyncController {
    api: Arc<dyn FavoritesApi>,
    user_id: String,
    recipe_id: String,
    state: SaveState,
}

impl SyncController {
    pub fn new(api: Arc<dyn FavoritesApi>, user_id: &str, recipe_id: &str) -> Self {
        Self {
            api,
            user_id: user_id.to_string(),
            recipe_id: recipe_id.to_string(),
            state: SaveState::Unknown,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    /// The canonical recipe id arrives as a string; the store keys favorites
    /// by integer, so membership is checked via numeric coercion.
    fn numeric_id(&self) -> Option<i32> {
        self.recipe_id.trim().parse().ok()
    }

    /// Resolve `Unknown` by fetching the user's favorites on screen entry.
    ///
    /// A fetch failure is swallowed and defaults to `Unsaved` rather than
    /// blocking the screen.
    pub async fn initialize(&mut self) -> SaveState {
        let saved = match self.api.list(&self.user_id).await {
            Ok(favorites) => {
                let id = self.numeric_id();
                id.is_some() && favorites.iter().any(|f| Some(f.recipe_id) == id)
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    recipe_id = %self.recipe_id,
                    "failed to check saved state, defaulting to unsaved"
                );
                false
            }
        };
        self.state = if saved {
            SaveState::Saved
        } else {
            SaveState::Unsaved
        };
        self.state
    }

    /// Toggle the favorite, optimistically transitioning through
    /// `Saving`/`Removing` and reverting on failure.
    ///
    /// Returns the settled state on success. `Unknown` toggles as an add,
    /// matching the screen's pre-initialization behavior.
    pub async fn toggle(&mut self, recipe: &Recipe) -> Result<SaveState, ToggleError> {
        if recipe.id != self.recipe_id {
            return Err(ToggleError::RecipeMismatch);
        }

        match self.state {
            SaveState::Saving | SaveState::Removing => Err(ToggleError::InFlight),
            SaveState::Saved => self.remove().await,
            SaveState::Unknown | SaveState::Unsaved => self.add(recipe).await,
        }
    }

    async fn add(&mut self, recipe: &Recipe) -> Result<SaveState, ToggleError> {
        let Some(recipe_id) = self.numeric_id() else {
            return Err(ToggleError::InvalidRecipeId);
        };

        self.state = SaveState::Saving;
        let favorite = NewFavorite {
            user_id: self.user_id.clone(),
            recipe_id,
            title: recipe.title.clone(),
            image: Some(recipe.image.clone()).filter(|i| !i.is_empty()),
            cook_time: Some(recipe.cook_time.clone()),
            servings: Some(recipe.servings as i32),
        };

        match self.api.add(&favorite).await {
            Ok(()) => {
                self.state = SaveState::Saved;
                Ok(self.state)
            }
            Err(error) => {
                tracing::warn!(%error, recipe_id = %self.recipe_id, "failed to save favorite");
                self.state = SaveState::Unsaved;
                Err(ToggleError::Failed)
            }
        }
    }

    async fn remove(&mut self) -> Result<SaveState, ToggleError> {
        let Some(recipe_id) = self.numeric_id() else {
            return Err(ToggleError::InvalidRecipeId);
        };

        self.state = SaveState::Removing;
        match self.api.remove(&self.user_id, recipe_id).await {
            Ok(()) => {
                self.state = SaveState::Unsaved;
                Ok(self.state)
            }
            Err(error) => {
                tracing::warn!(%error, recipe_id = %self.recipe_id, "failed to remove favorite");
                self.state = SaveState::Saved;
                Err(ToggleError::Failed)
            }
        }
    }
}

/// Check-off state for one ingredient or instruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    /// Mid-gesture (swipe) acknowledgement awaiting confirm or cancel.
    Confirming,
}

/// Per-item check-off map keyed by stable item identity.
#[derive(Debug, Default)]
pub struct ChecklistState {
    items: HashMap<String, CheckState>,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, item: &str) -> CheckState {
        self.items.get(item).copied().unwrap_or_default()
    }

    /// Tap: flip between `Unchecked` and `Checked`. A `Confirming` item
    /// settles to `Checked`.
    pub fn toggle(&mut self, item: &str) -> CheckState {
        let next = match self.state(item) {
            CheckState::Unchecked => CheckState::Checked,
            CheckState::Checked => CheckState::Unchecked,
            CheckState::Confirming => CheckState::Checked,
        };
        self.items.insert(item.to_string(), next);
        next
    }

    /// Swipe gesture opened: mark the item as awaiting confirmation.
    pub fn begin_confirm(&mut self, item: &str) {
        self.items.insert(item.to_string(), CheckState::Confirming);
    }

    /// Settle a `Confirming` item as checked.
    pub fn confirm(&mut self, item: &str) {
        if self.state(item) == CheckState::Confirming {
            self.items.insert(item.to_string(), CheckState::Checked);
        }
    }

    /// Cancel clears the item back to unchecked regardless of current state.
    pub fn cancel(&mut self, item: &str) {
        self.items.remove(item);
    }

    pub fn checked_count(&self) -> usize {
        self.items
            .values()
            .filter(|s| **s == CheckState::Checked)
            .count()
    }

    /// Reset everything, e.g. when a different recipe loads.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites_api::MockFavoritesApi;
    use crate::types::{FavoriteRecord, RawMealRecord};

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: "Teriyaki Chicken Casserole".to_string(),
            description: "Delicious meal from TheMealDB".to_string(),
            image: "https://example.com/thumb.jpg".to_string(),
            cook_time: "45min".to_string(),
            servings: 2,
            category: "Chicken".to_string(),
            area: Some("Japanese".to_string()),
            ingredients: vec!["3/4 cup soy sauce".to_string()],
            instructions: vec!["Preheat oven to 350F.".to_string()],
            youtube_url: None,
            original_data: RawMealRecord::default(),
        }
    }

    fn favorite(user_id: &str, recipe_id: i32) -> FavoriteRecord {
        FavoriteRecord {
            user_id: user_id.to_string(),
            recipe_id,
            title: "Teriyaki Chicken Casserole".to_string(),
            image: None,
            cook_time: None,
            servings: None,
        }
    }

    #[tokio::test]
    async fn initialize_resolves_saved_via_numeric_match() {
        let api = Arc::new(MockFavoritesApi::new().with_favorite(favorite("u1", 52772)));
        let mut controller = SyncController::new(api, "u1", "52772");

        assert_eq!(controller.state(), SaveState::Unknown);
        assert_eq!(controller.initialize().await, SaveState::Saved);
    }

    #[tokio::test]
    async fn initialize_resolves_unsaved_when_absent() {
        let api = Arc::new(MockFavoritesApi::new().with_favorite(favorite("u1", 11111)));
        let mut controller = SyncController::new(api, "u1", "52772");

        assert_eq!(controller.initialize().await, SaveState::Unsaved);
    }

    #[tokio::test]
    async fn initialize_failure_defaults_to_unsaved() {
        let api = Arc::new(MockFavoritesApi::new().with_favorite(favorite("u1", 52772)));
        api.set_fail_list(true);
        let mut controller = SyncController::new(api, "u1", "52772");

        assert_eq!(controller.initialize().await, SaveState::Unsaved);
    }

    #[tokio::test]
    async fn toggle_on_saves_and_persists() {
        let api = Arc::new(MockFavoritesApi::new());
        let mut controller = SyncController::new(api.clone(), "u1", "52772");
        controller.initialize().await;

        let state = controller.toggle(&recipe("52772")).await.unwrap();
        assert_eq!(state, SaveState::Saved);

        let stored = api.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].recipe_id, 52772);
        assert_eq!(stored[0].cook_time.as_deref(), Some("45min"));
        assert_eq!(stored[0].servings, Some(2));
    }

    #[tokio::test]
    async fn toggle_off_removes_and_settles_unsaved() {
        let api = Arc::new(MockFavoritesApi::new().with_favorite(favorite("u1", 52772)));
        let mut controller = SyncController::new(api.clone(), "u1", "52772");
        controller.initialize().await;
        assert_eq!(controller.state(), SaveState::Saved);

        let state = controller.toggle(&recipe("52772")).await.unwrap();
        assert_eq!(state, SaveState::Unsaved);
        assert!(api.stored().is_empty());
    }

    #[tokio::test]
    async fn failed_add_reverts_to_unsaved() {
        let api = Arc::new(MockFavoritesApi::new());
        api.set_fail_add(true);
        let mut controller = SyncController::new(api.clone(), "u1", "52772");
        controller.initialize().await;

        let err = controller.toggle(&recipe("52772")).await.unwrap_err();
        assert_eq!(err, ToggleError::Failed);
        assert_eq!(controller.state(), SaveState::Unsaved);
        assert!(api.stored().is_empty());

        // A subsequent toggle is allowed again once the failure reverted.
        api.set_fail_add(false);
        assert_eq!(
            controller.toggle(&recipe("52772")).await.unwrap(),
            SaveState::Saved
        );
    }

    #[tokio::test]
    async fn failed_remove_reverts_to_saved() {
        let api = Arc::new(MockFavoritesApi::new().with_favorite(favorite("u1", 52772)));
        api.set_fail_remove(true);
        let mut controller = SyncController::new(api.clone(), "u1", "52772");
        controller.initialize().await;

        let err = controller.toggle(&recipe("52772")).await.unwrap_err();
        assert_eq!(err, ToggleError::Failed);
        assert_eq!(controller.state(), SaveState::Saved);
        assert_eq!(api.stored().len(), 1);
    }

    #[tokio::test]
    async fn mismatched_recipe_is_rejected_without_state_change() {
        let api = Arc::new(MockFavoritesApi::new());
        let mut controller = SyncController::new(api, "u1", "52772");
        controller.initialize().await;

        let err = controller.toggle(&recipe("99999")).await.unwrap_err();
        assert_eq!(err, ToggleError::RecipeMismatch);
        assert_eq!(controller.state(), SaveState::Unsaved);
    }

    #[tokio::test]
    async fn non_numeric_recipe_id_is_rejected() {
        let api = Arc::new(MockFavoritesApi::new());
        let mut controller = SyncController::new(api, "u1", "not-a-number");
        controller.initialize().await;

        let err = controller.toggle(&recipe("not-a-number")).await.unwrap_err();
        assert_eq!(err, ToggleError::InvalidRecipeId);
    }

    #[tokio::test]
    async fn unknown_state_toggles_as_add() {
        let api = Arc::new(MockFavoritesApi::new());
        let mut controller = SyncController::new(api.clone(), "u1", "52772");

        // No initialize: screen user tapped before the check completed.
        let state = controller.toggle(&recipe("52772")).await.unwrap();
        assert_eq!(state, SaveState::Saved);
        assert_eq!(api.stored().len(), 1);
    }

    #[test]
    fn checklist_is_keyed_by_identity_not_index() {
        let mut checklist = ChecklistState::new();
        checklist.toggle("3/4 cup soy sauce");
        assert_eq!(checklist.state("3/4 cup soy sauce"), CheckState::Checked);

        // Reordering or inserting items cannot drift the checked entry.
        assert_eq!(checklist.state("1 cup brown sugar"), CheckState::Unchecked);
        assert_eq!(checklist.checked_count(), 1);
    }

    #[test]
    fn checklist_confirm_flow() {
        let mut checklist = ChecklistState::new();
        checklist.begin_confirm("1 cup brown sugar");
        assert_eq!(checklist.state("1 cup brown sugar"), CheckState::Confirming);

        checklist.confirm("1 cup brown sugar");
        assert_eq!(checklist.state("1 cup brown sugar"), CheckState::Checked);

        checklist.cancel("1 cup brown sugar");
        assert_eq!(checklist.state("1 cup brown sugar"), CheckState::Unchecked);
    }

    #[test]
    fn checklist_clear_resets_for_new_recipe() {
        let mut checklist = ChecklistState::new();
        checklist.toggle("salt");
        checklist.clear();
        assert_eq!(checklist.checked_count(), 0);
    }
}
