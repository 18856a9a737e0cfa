use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted favorite: the association between a user identity and a
/// catalog recipe, plus the denormalized display fields the saved-recipes
/// screen renders without re-fetching the catalog.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i32,
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    pub image: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::favorites)]
pub struct NewFavoriteRow<'a> {
    pub user_id: &'a str,
    pub recipe_id: i32,
    pub title: &'a str,
    pub image: Option<&'a str>,
    pub cook_time: Option<&'a str>,
    pub servings: Option<i32>,
}
