//! Raw record adapter for the external meal catalog (TheMealDB-compatible).
//!
//! Returns provider-native [`RawMealRecord`] values unmodified; normalization
//! is a separate, pure step (see [`crate::normalize`]). The transport sits
//! behind the [`HttpClient`] trait so tests can run against [`MockClient`]
//! without touching the network.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::RawMealRecord;

/// TheMealDB's free v1 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Trait for HTTP transports, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch the response body for a GET request.
    async fn get(&self, url: &str) -> Result<String, CatalogError>;
}

/// Production transport backed by a pooled reqwest client.
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.inner.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Mock transport keyed by exact URL, for tests.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, Result<String, String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful response body for a URL.
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    /// Add an error response for a URL.
    pub fn with_error(mut self, url: &str, error: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(error.to_string()));
        self
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str) -> Result<String, CatalogError> {
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(error)) => Err(CatalogError::InvalidUrl(error.clone())),
            None => Err(CatalogError::InvalidUrl(format!(
                "No mock response for URL: {url}"
            ))),
        }
    }
}

/// A category row from the catalog's category listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    #[serde(rename = "idCategory", default)]
    pub id: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub name: Option<String>,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// The catalog wraps every meal response in a `meals` envelope; "no results"
/// arrives as a JSON null rather than an empty array.
#[derive(Debug, Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<RawMealRecord>>,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<CategoryRecord>>,
}

/// Client for the external meal catalog.
pub struct MealCatalog {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl MealCatalog {
    /// Create a catalog client against the default public endpoint.
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String, CatalogError> {
        let mut url = reqwest::Url::parse(&format!("{}/{path}", self.base_url))
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url.into())
    }

    async fn fetch_meals(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawMealRecord>, CatalogError> {
        let url = self.endpoint(path, params)?;
        let body = self.client.get(&url).await?;
        let envelope: MealsEnvelope = serde_json::from_str(&body)
            .map_err(|e| CatalogError::InvalidPayload(e.to_string()))?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Search meals by name. No results is an empty vec, not an error.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<RawMealRecord>, CatalogError> {
        self.fetch_meals("search.php", &[("s", query)]).await
    }

    /// Look up a single meal by its catalog id.
    pub async fn lookup_by_id(&self, id: &str) -> Result<Option<RawMealRecord>, CatalogError> {
        let meals = self.fetch_meals("lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    /// Fetch one random meal.
    pub async fn random(&self) -> Result<Option<RawMealRecord>, CatalogError> {
        let meals = self.fetch_meals("random.php", &[]).await?;
        Ok(meals.into_iter().next())
    }

    /// Fetch up to `count` random meals with independent concurrent requests.
    /// Failed or empty results are discarded without retry, so the returned
    /// batch may be smaller than requested.
    pub async fn random_batch(&self, count: usize) -> Vec<RawMealRecord> {
        let fetches = (0..count).map(|_| self.random());
        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(meal) => meal,
                Err(error) => {
                    tracing::debug!(%error, "random meal fetch failed, discarding");
                    None
                }
            })
            .collect()
    }

    /// List all catalog categories.
    pub async fn categories(&self) -> Result<Vec<CategoryRecord>, CatalogError> {
        let url = self.endpoint("categories.php", &[])?;
        let body = self.client.get(&url).await?;
        let envelope: CategoriesEnvelope = serde_json::from_str(&body)
            .map_err(|e| CatalogError::InvalidPayload(e.to_string()))?;
        Ok(envelope.categories.unwrap_or_default())
    }

    /// List meals containing the given ingredient.
    pub async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RawMealRecord>, CatalogError> {
        self.fetch_meals("filter.php", &[("i", ingredient)]).await
    }

    /// List meals in the given category.
    pub async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RawMealRecord>, CatalogError> {
        self.fetch_meals("filter.php", &[("c", category)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(mock: MockClient) -> MealCatalog {
        MealCatalog::with_base_url(Arc::new(mock), "http://catalog.test/v1")
    }

    #[tokio::test]
    async fn search_parses_meals_envelope() {
        let mock = MockClient::new().with_body(
            "http://catalog.test/v1/search.php?s=chicken",
            r#"{"meals":[{"idMeal":"1","strMeal":"Chicken Soup"}]}"#,
        );
        let meals = catalog(mock).search_by_name("chicken").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].title.as_deref(), Some("Chicken Soup"));
    }

    #[tokio::test]
    async fn search_encodes_query() {
        let mock = MockClient::new().with_body(
            "http://catalog.test/v1/search.php?s=beef+%26+ale",
            r#"{"meals":null}"#,
        );
        let meals = catalog(mock).search_by_name("beef & ale").await.unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn null_meals_normalizes_to_empty() {
        let mock = MockClient::new()
            .with_body("http://catalog.test/v1/filter.php?c=Dessert", r#"{"meals":null}"#);
        let meals = catalog(mock).filter_by_category("Dessert").await.unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn lookup_returns_first_meal() {
        let mock = MockClient::new().with_body(
            "http://catalog.test/v1/lookup.php?i=52772",
            r#"{"meals":[{"idMeal":"52772"}]}"#,
        );
        let meal = catalog(mock).lookup_by_id("52772").await.unwrap();
        assert_eq!(meal.unwrap().id.as_deref(), Some("52772"));
    }

    #[tokio::test]
    async fn lookup_missing_id_is_none_not_error() {
        let mock = MockClient::new()
            .with_body("http://catalog.test/v1/lookup.php?i=999", r#"{"meals":null}"#);
        let meal = catalog(mock).lookup_by_id("999").await.unwrap();
        assert!(meal.is_none());
    }

    #[tokio::test]
    async fn random_batch_discards_failures() {
        // Every random call hits the same URL; an error response means the
        // whole batch quietly collapses to empty.
        let mock =
            MockClient::new().with_error("http://catalog.test/v1/random.php", "upstream down");
        let meals = catalog(mock).random_batch(3).await;
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn random_batch_collects_successes() {
        let mock = MockClient::new().with_body(
            "http://catalog.test/v1/random.php",
            r#"{"meals":[{"idMeal":"52772"}]}"#,
        );
        let meals = catalog(mock).random_batch(3).await;
        assert_eq!(meals.len(), 3);
    }

    #[tokio::test]
    async fn malformed_payload_is_distinguishable() {
        let mock = MockClient::new().with_body("http://catalog.test/v1/random.php", "not json");
        let err = catalog(mock).random().await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn categories_parses_envelope() {
        let mock = MockClient::new().with_body(
            "http://catalog.test/v1/categories.php",
            r#"{"categories":[{"idCategory":"1","strCategory":"Beef"}]}"#,
        );
        let categories = catalog(mock).categories().await.unwrap();
        assert_eq!(categories[0].name.as_deref(), Some("Beef"));
    }
}
