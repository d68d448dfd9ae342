use crate::models::{GarmentItem, OutfitCandidate, ShoppingRecommendation, UserProfile, WeatherSnapshot};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the wardrobe store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Wardrobe store API client
///
/// Handles all communication with the wardrobe backend including:
/// - Fetching a user's garment items and profile
/// - Reading cached weather snapshots
/// - Persisting saved outfits and shopping recommendations
pub struct WardrobeStoreClient {
    base_url: String,
    api_key: String,
    client: Client,
    weather_cache: moka::future::Cache<String, WeatherSnapshot>,
}

impl WardrobeStoreClient {
    /// Create a new store client. Weather snapshots are cached in-process
    /// for `weather_ttl_secs` to honour the store's freshness window.
    pub fn new(base_url: String, api_key: String, weather_ttl_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let weather_cache = moka::future::CacheBuilder::new(256)
            .time_to_live(Duration::from_secs(weather_ttl_secs))
            .build();

        Self {
            base_url,
            api_key,
            client,
            weather_cache,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch every garment item for one owner.
    pub async fn get_items(&self, owner_id: &str) -> Result<Vec<GarmentItem>, StoreError> {
        let url = self.url(&format!("owners/{}/items", owner_id));
        tracing::debug!("Fetching items from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch items: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let documents = json
            .get("items")
            .and_then(|d| d.as_array())
            .ok_or_else(|| StoreError::InvalidResponse("Missing items array".into()))?;

        // Malformed documents are skipped rather than failing the batch.
        let items: Vec<GarmentItem> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!("Fetched {} items for {}", items.len(), owner_id);

        Ok(items)
    }

    /// Fetch one owner's profile. A missing profile is a normal state for
    /// first-time users, so 404 maps to Ok(None).
    pub async fn get_profile(&self, owner_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let url = self.url(&format!("owners/{}/profile", owner_id));

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let profile: UserProfile = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        Ok(Some(profile))
    }

    /// Read the current weather snapshot for a location, cache-aware.
    pub async fn get_weather(&self, location: &str) -> Result<Option<WeatherSnapshot>, StoreError> {
        let key = location.to_lowercase();
        if let Some(cached) = self.weather_cache.get(&key).await {
            tracing::trace!("Weather cache hit: {}", key);
            return Ok(Some(cached));
        }

        let url = self.url(&format!("weather/{}", location));

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch weather: {}",
                response.status()
            )));
        }

        let snapshot: WeatherSnapshot = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse weather: {}", e)))?;

        self.weather_cache.insert(key, snapshot.clone()).await;

        Ok(Some(snapshot))
    }

    /// Persist an explicitly saved outfit; returns the stored outfit id.
    pub async fn save_outfit(
        &self,
        owner_id: &str,
        outfit: &OutfitCandidate,
    ) -> Result<String, StoreError> {
        let url = self.url(&format!("owners/{}/outfits", owner_id));

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(outfit)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to save outfit: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.unwrap_or(Value::Null);
        let outfit_id = json
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        tracing::debug!("Saved outfit {} for {}", outfit_id, owner_id);

        Ok(outfit_id)
    }

    /// Persist a shopping recommendation record.
    pub async fn save_recommendation(
        &self,
        record: &ShoppingRecommendation,
    ) -> Result<(), StoreError> {
        let url = self.url("recommendations");

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to save recommendation: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> WardrobeStoreClient {
        WardrobeStoreClient::new(server.url(), "test_key".to_string(), 60)
    }

    #[test]
    fn test_store_client_creation() {
        let client = WardrobeStoreClient::new(
            "http://store.test/api/".to_string(),
            "test_key".to_string(),
            60,
        );
        assert_eq!(client.url("owners/demo/items"), "http://store.test/api/owners/demo/items");
    }

    #[tokio::test]
    async fn test_get_items_skips_malformed_documents() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/owners/demo/items")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"id": 1, "ownerId": "demo", "name": "white tee", "category": "tops", "colors": ["white"]},
                    {"bogus": true}
                ], "total": 2}"#,
            )
            .create_async()
            .await;

        let items = client_for(&server).get_items("demo").await.unwrap();
        mock.assert_async().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/owners/demo/profile")
            .with_status(404)
            .create_async()
            .await;

        let profile = client_for(&server).get_profile("demo").await.unwrap();
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn test_weather_cached_between_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/weather/berlin")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"temperatureC": 12.5, "condition": "cloudy"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let first = client.get_weather("berlin").await.unwrap().unwrap();
        let second = client.get_weather("Berlin").await.unwrap().unwrap();
        mock.assert_async().await;
        assert_eq!(first.temperature_c, 12.5);
        assert_eq!(second.condition, "cloudy");
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/owners/demo/items")
            .with_status(500)
            .create_async()
            .await;

        let result = client_for(&server).get_items("demo").await;
        assert!(matches!(result, Err(StoreError::ApiError(_))));
    }
}
