//! Recipe normalization.
//!
//! Converts the catalog's loosely structured [`RawMealRecord`] (flat numbered
//! ingredient/measure fields, free-text tags, newline-delimited instructions)
//! into the canonical [`Recipe`]. Pure and total: malformed or missing
//! optional fields degrade to documented defaults, never to an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{RawMealRecord, Recipe};

/// Serving count used when the tags carry no "serves N" hint.
pub const DEFAULT_SERVINGS: u32 = 4;
/// Cook time used when neither tags nor the first instruction carry one.
pub const DEFAULT_COOK_TIME: &str = "30 minutes";
/// Description used when the record has no instructions.
pub const DEFAULT_DESCRIPTION: &str = "Delicious meal from TheMealDB";
/// Category used when the record omits one.
pub const DEFAULT_CATEGORY: &str = "Main Course";

/// The catalog's fixed-width ingredient slot count.
const INGREDIENT_SLOTS: usize = 20;
/// Maximum length of the instruction-derived description, in characters.
const DESCRIPTION_LIMIT: usize = 120;

/// Matches "serves 2" / "Serves-2" style tags; first match wins.
static SERVES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)serves?-?(\d+)").expect("Invalid serves regex"));

/// Matches "<number><unit>" cook-time hints like "45min" or "1 hour".
/// Alternatives are ordered longest-first so "10 minutes" is captured whole.
static COOK_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(minutes|minute|min|hours|hour|hr)").expect("Invalid cook-time regex")
});

/// Normalize a raw catalog record into a canonical [`Recipe`].
///
/// An absent record normalizes to `None` rather than an error, matching the
/// catalog's "no result" envelope.
pub fn normalize(raw: Option<RawMealRecord>) -> Option<Recipe> {
    raw.map(normalize_record)
}

fn normalize_record(meal: RawMealRecord) -> Recipe {
    let ingredients = extract_ingredients(&meal);
    let instructions = extract_instructions(meal.instructions.as_deref());
    let servings = parse_servings(meal.tags.as_deref());
    let cook_time = parse_cook_time(
        meal.tags.as_deref(),
        instructions.first().map(String::as_str),
    );
    let description = describe(meal.instructions.as_deref());

    Recipe {
        id: meal.id.clone().unwrap_or_default(),
        title: meal.title.clone().unwrap_or_default(),
        description,
        image: meal.thumbnail.clone().unwrap_or_default(),
        cook_time,
        servings,
        category: meal
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        area: meal.area.clone(),
        ingredients,
        instructions,
        youtube_url: meal.youtube.clone().filter(|u| !u.trim().is_empty()),
        original_data: meal,
    }
}

/// Walk the numbered slots in order, emitting `"<measure> <ingredient>"`.
/// Blank slots are skipped without leaving a gap; a blank measure drops the
/// measure segment entirely (no leading space).
fn extract_ingredients(meal: &RawMealRecord) -> Vec<String> {
    let mut ingredients = Vec::new();
    for slot in 1..=INGREDIENT_SLOTS {
        let Some(ingredient) = meal
            .ingredient(slot)
            .map(str::trim)
            .filter(|i| !i.is_empty())
        else {
            continue;
        };
        match meal.measure(slot).map(str::trim).filter(|m| !m.is_empty()) {
            Some(measure) => ingredients.push(format!("{measure} {ingredient}")),
            None => ingredients.push(ingredient.to_string()),
        }
    }
    ingredients
}

/// Split on line breaks (bare or carriage-return-prefixed), trim, drop blanks.
fn extract_instructions(raw: Option<&str>) -> Vec<String> {
    raw.map(|text| {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_servings(tags: Option<&str>) -> u32 {
    tags.and_then(|t| SERVES_REGEX.captures(t))
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(DEFAULT_SERVINGS)
}

/// Two-stage precedence: a tag-derived value is taken first, then overridden
/// by a match in the first instruction step when one exists.
fn parse_cook_time(tags: Option<&str>, first_step: Option<&str>) -> String {
    let from_tags = tags
        .and_then(|t| COOK_TIME_REGEX.find(t))
        .map(|m| m.as_str().to_string());
    let from_instructions = first_step
        .and_then(|s| COOK_TIME_REGEX.find(s))
        .map(|m| m.as_str().to_string());

    from_instructions
        .or(from_tags)
        .unwrap_or_else(|| DEFAULT_COOK_TIME.to_string())
}

fn describe(instructions: Option<&str>) -> String {
    match instructions {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{head}...")
        }
        _ => DEFAULT_DESCRIPTION.to_string(),
    }
}
