use crate::constants::DEFAULT_DIRECTIONS_BASE_URL;
use crate::error::{PlanError, Result};
use crate::models::{Coordinates, RouteCandidate, TransportMode};
use crate::services::providers::DirectionsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// HTTP directions client. One implementation of [`DirectionsProvider`];
/// the mode profile is appended to the base URL as a path segment.
#[derive(Clone)]
pub struct DirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DirectionsClient {
    pub fn new(api_key: String) -> Self {
        DirectionsClient {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        DirectionsClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl DirectionsProvider for DirectionsClient {
    async fn routes(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TransportMode,
    ) -> Result<Vec<RouteCandidate>> {
        let url = format!("{}/{}", self.base_url, mode.provider_profile());

        tracing::debug!(
            mode = %mode,
            "Directions request ({:.4},{:.4}) -> ({:.4},{:.4})",
            origin.lat, origin.lng, destination.lat, destination.lng
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", format!("{},{}", origin.lng, origin.lat)),
                (
                    "destination",
                    format!("{},{}", destination.lng, destination.lat),
                ),
            ])
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| PlanError::Provider(format!("Directions request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                mode = %mode,
                "Directions API HTTP error {}: {}",
                status, error_text
            );
            return Err(PlanError::Provider(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let parsed: DirectionsApiResponse = response.json().await.map_err(|e| {
            PlanError::Provider(format!("Failed to parse directions response: {}", e))
        })?;

        // An empty route list is a valid answer: the mode cannot serve this
        // origin/destination pair.
        let candidates: Vec<RouteCandidate> = parsed
            .routes
            .into_iter()
            .map(|route| RouteCandidate {
                duration_seconds: route.summary.duration.round() as u32,
                distance_km: route.summary.distance / 1000.0,
                cost: route.summary.fare.and_then(|f| match mode {
                    TransportMode::Taxi => f.taxi,
                    _ => f.regular,
                }),
            })
            .collect();

        tracing::debug!(
            mode = %mode,
            "Directions API returned {} candidates",
            candidates.len()
        );
        Ok(candidates)
    }
}

// Directions API response types

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    summary: ApiRouteSummary,
}

#[derive(Debug, Deserialize)]
struct ApiRouteSummary {
    /// Seconds
    duration: f64,
    /// Meters
    distance: f64,
    #[serde(default)]
    fare: Option<ApiFare>,
}

#[derive(Debug, Deserialize)]
struct ApiFare {
    #[serde(default)]
    regular: Option<u32>,
    #[serde(default)]
    taxi: Option<u32>,
}
