//! Domain types shared by the catalog adapter, normalizer, and sync controller.
//!
//! `FavoriteRecord` mirrors the server's persisted row but is defined
//! independently so this crate carries no database dependencies. Integration
//! tests on the server side catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A meal record exactly as the external catalog serves it.
///
/// The provider's schema is outside our control: every field may be absent,
/// null, or blank. The stable fields are named; everything else (including
/// the 20 numbered ingredient/measure pairs) is retained in `extra` so a
/// round-trip through [`Recipe::original_data`] loses nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMealRecord {
    #[serde(rename = "idMeal", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "strMeal", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "strInstructions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<String>,
    #[serde(
        rename = "strMealThumb",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<String>,
    #[serde(rename = "strTags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(
        rename = "strCategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(rename = "strArea", default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(
        rename = "strYoutube",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube: Option<String>,
    /// All remaining provider fields, keyed by their original names.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RawMealRecord {
    /// The ingredient string in the given slot (1..=20), if present and a string.
    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.extra
            .get(&format!("strIngredient{slot}"))
            .and_then(Value::as_str)
    }

    /// The measure string paired with the given slot, if present and a string.
    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.extra
            .get(&format!("strMeasure{slot}"))
            .and_then(Value::as_str)
    }
}

/// The canonical recipe representation produced by [`crate::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable, externally assigned identifier (the catalog's `idMeal`).
    pub id: String,
    pub title: String,
    /// Bounded-length derivative of the raw instructions.
    pub description: String,
    pub image: String,
    pub cook_time: String,
    pub servings: u32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// `"<measure> <ingredient>"` lines in source slot order, blanks skipped.
    pub ingredients: Vec<String>,
    /// Non-blank instruction lines in source order.
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    /// The untouched source record, for fields the canonical schema does not model.
    pub original_data: RawMealRecord,
}

/// Payload for creating a favorite via the favorites API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
}

/// A persisted favorite as returned by the favorites API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub user_id: String,
    pub recipe_id: i32,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub servings: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_retains_unmodeled_fields() {
        let record: RawMealRecord = serde_json::from_str(
            r#"{"idMeal":"52772","strMeal":"Teriyaki Chicken","strIngredient1":"soy sauce","strSource":"http://example.com"}"#,
        )
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("52772"));
        assert_eq!(record.ingredient(1), Some("soy sauce"));
        assert_eq!(
            record.extra.get("strSource").and_then(Value::as_str),
            Some("http://example.com")
        );

        // Round-trips back out under the provider's field names.
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["idMeal"], "52772");
        assert_eq!(json["strSource"], "http://example.com");
    }

    #[test]
    fn null_ingredient_slots_read_as_absent() {
        let record: RawMealRecord =
            serde_json::from_str(r#"{"strIngredient1":null,"strMeasure1":"1 cup"}"#).unwrap();
        assert_eq!(record.ingredient(1), None);
        assert_eq!(record.measure(1), Some("1 cup"));
    }

    #[test]
    fn favorite_record_tolerates_extra_server_fields() {
        let record: FavoriteRecord = serde_json::from_str(
            r#"{"id":7,"userId":"u1","recipeId":52772,"title":"Teriyaki Chicken","createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(record.recipe_id, 52772);
        assert_eq!(record.image, None);
    }
}
