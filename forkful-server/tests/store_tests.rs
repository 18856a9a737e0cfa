//! Store invariant tests: uniqueness under concurrency and idempotent removal.

use std::sync::Arc;

use forkful_server::store::{FavoritesStore, MemoryStore, NewFavorite, StoreError};

fn favorite(user_id: &str, recipe_id: i32) -> NewFavorite {
    NewFavorite {
        user_id: user_id.to_string(),
        recipe_id,
        title: "Teriyaki Chicken Casserole".to_string(),
        image: None,
        cook_time: Some("45min".to_string()),
        servings: Some(2),
    }
}

#[tokio::test]
async fn add_returns_persisted_row_with_assigned_id() {
    let store = MemoryStore::new();
    let row = store.add(favorite("u1", 52772)).await.unwrap();
    assert!(row.id > 0);
    assert_eq!(row.recipe_id, 52772);
}

#[tokio::test]
async fn add_rejects_blank_required_fields() {
    let store = MemoryStore::new();

    let err = store.add(favorite("", 52772)).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingField("userId")));

    let mut missing_title = favorite("u1", 52772);
    missing_title.title = " ".to_string();
    let err = store.add(missing_title).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingField("title")));
}

#[tokio::test]
async fn concurrent_duplicate_adds_leave_exactly_one_row() {
    let store = Arc::new(MemoryStore::new());

    let (a, b) = tokio::join!(
        store.add(favorite("u1", 52772)),
        store.add(favorite("u1", 52772)),
    );

    // Exactly one winner; the loser's outcome is a distinguishable conflict.
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(StoreError::Duplicate))));

    assert_eq!(store.list_by_user("u1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_recipe_for_different_users_is_not_a_conflict() {
    let store = MemoryStore::new();
    store.add(favorite("u1", 52772)).await.unwrap();
    store.add(favorite("u2", 52772)).await.unwrap();

    assert_eq!(store.list_by_user("u1").await.unwrap().len(), 1);
    assert_eq!(store.list_by_user("u2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let store = MemoryStore::new();
    store.add(favorite("u1", 52772)).await.unwrap();

    assert!(store.remove("u1", 52772).await.unwrap());
    assert!(!store.remove("u1", 52772).await.unwrap());
    assert!(!store.remove("u1", 52772).await.unwrap());
}

#[tokio::test]
async fn concurrent_removes_are_safe() {
    let store = Arc::new(MemoryStore::new());
    store.add(favorite("u1", 52772)).await.unwrap();

    let (a, b) = tokio::join!(store.remove("u1", 52772), store.remove("u1", 52772));

    // At most one observed a row; neither errored.
    let removed = [a.unwrap(), b.unwrap()];
    assert_eq!(removed.iter().filter(|r| **r).count(), 1);
    assert!(store.list_by_user("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_only_touches_the_matching_pair() {
    let store = MemoryStore::new();
    store.add(favorite("u1", 52772)).await.unwrap();
    store.add(favorite("u1", 52893)).await.unwrap();

    assert!(store.remove("u1", 52772).await.unwrap());
    let remaining = store.list_by_user("u1").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].recipe_id, 52893);
}
