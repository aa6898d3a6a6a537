use crate::constants::DEFAULT_SEARCH_BASE_URL;
use crate::error::{PlanError, Result};
use crate::models::SearchResult;
use crate::services::providers::SearchProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// How the client authenticates with the search API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: `Authorization: KakaoAK <key>` header.
    RestKey,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

/// HTTP keyword place-search client. One implementation of
/// [`SearchProvider`]; tests inject fixtures instead.
#[derive(Clone)]
pub struct GeocoderClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl GeocoderClient {
    pub fn new(api_key: String) -> Self {
        GeocoderClient {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            auth_mode: AuthMode::RestKey,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        GeocoderClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }
}

#[async_trait]
impl SearchProvider for GeocoderClient {
    async fn search_by_name(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::debug!("Place search request: {:?}", query);

        let mut request = self.client.get(&self.base_url).query(&[("query", query)]);

        match self.auth_mode {
            AuthMode::RestKey => {
                request = request.header("Authorization", format!("KakaoAK {}", self.api_key));
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| PlanError::Provider(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Search API HTTP error {}: {}",
                status, error_text
            );
            return Err(PlanError::Provider(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: KeywordSearchResponse = response
            .json()
            .await
            .map_err(|e| PlanError::Provider(format!("Failed to parse search response: {}", e)))?;

        // Rows with unparsable coordinates are skipped rather than failing
        // the whole result set.
        let results: Vec<SearchResult> = parsed
            .documents
            .into_iter()
            .filter_map(|doc| {
                let map_x = doc.x.parse().ok()?;
                let map_y = doc.y.parse().ok()?;
                Some(SearchResult {
                    display_name: doc.place_name,
                    address: doc.address_name,
                    map_x,
                    map_y,
                })
            })
            .collect();

        tracing::debug!("Place search returned {} results", results.len());
        Ok(results)
    }
}

// Search API response types

#[derive(Debug, Deserialize)]
struct KeywordSearchResponse {
    documents: Vec<KeywordDocument>,
}

#[derive(Debug, Deserialize)]
struct KeywordDocument {
    place_name: String,
    address_name: String,
    /// Longitude, serialized as a string by the provider.
    x: String,
    /// Latitude, serialized as a string by the provider.
    y: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_rest_key() {
        let client = GeocoderClient::new("test-key".to_string());
        assert_eq!(client.base_url, DEFAULT_SEARCH_BASE_URL);
        assert!(matches!(client.auth_mode, AuthMode::RestKey));
    }

    #[test]
    fn test_with_config_bearer_mode() {
        let client = GeocoderClient::with_config(
            "my-key".to_string(),
            "http://localhost:4000/v1/search".to_string(),
            AuthMode::BearerHeader,
        );
        assert_eq!(client.base_url, "http://localhost:4000/v1/search");
        assert!(matches!(client.auth_mode, AuthMode::BearerHeader));
    }

    #[test]
    fn test_response_rows_with_bad_coordinates_are_skipped() {
        let raw = r#"{
            "documents": [
                {"place_name": "Jirisan", "address_name": "Jeolla", "x": "127.73", "y": "35.33"},
                {"place_name": "Broken", "address_name": "Nowhere", "x": "not-a-number", "y": "0"}
            ]
        }"#;
        let parsed: KeywordSearchResponse = serde_json::from_str(raw).unwrap();
        let ok_rows: Vec<_> = parsed
            .documents
            .into_iter()
            .filter(|d| d.x.parse::<f64>().is_ok() && d.y.parse::<f64>().is_ok())
            .collect();
        assert_eq!(ok_rows.len(), 1);
        assert_eq!(ok_rows[0].place_name, "Jirisan");
    }
}
