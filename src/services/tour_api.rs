use crate::constants::{
    DEFAULT_TOUR_BASE_URL, SPOT_FETCH_LIMIT_PER_CATEGORY, SPOT_SEARCH_RADIUS_METERS,
};
use crate::error::{PlanError, Result};
use crate::models::{Coordinates, Spot, SpotCategory};
use crate::services::providers::TourismProvider;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;

/// HTTP tourism POI client. Queries the location-based list endpoint once per
/// spot category and merges the results; one implementation of
/// [`TourismProvider`].
#[derive(Clone)]
pub struct TourApiClient {
    client: Client,
    service_key: String,
    base_url: String,
}

impl TourApiClient {
    pub fn new(service_key: String) -> Self {
        TourApiClient {
            client: Client::new(),
            service_key,
            base_url: DEFAULT_TOUR_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(service_key: String, base_url: String) -> Self {
        TourApiClient {
            client: Client::new(),
            service_key,
            base_url,
        }
    }

    async fn fetch_category(
        &self,
        center: &Coordinates,
        category: SpotCategory,
    ) -> Result<Vec<Spot>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("contentTypeId", category.provider_content_type()),
                ("mapX", &center.lng.to_string()),
                ("mapY", &center.lat.to_string()),
                ("radius", &SPOT_SEARCH_RADIUS_METERS.to_string()),
                ("numOfRows", &SPOT_FETCH_LIMIT_PER_CATEGORY.to_string()),
                ("_type", "json"),
            ])
            .send()
            .await
            .map_err(|e| PlanError::Provider(format!("Tourism request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(
                status = %status,
                category = %category,
                "Tourism API HTTP error"
            );
            return Err(PlanError::Provider(format!("HTTP {}", status)));
        }

        let parsed: LocationListResponse = response
            .json()
            .await
            .map_err(|e| PlanError::Provider(format!("Failed to parse tourism response: {}", e)))?;

        let items = parsed
            .response
            .body
            .items
            .map(|i| i.item)
            .unwrap_or_default();

        // Malformed rows are skipped; the provider distance (meters) is used
        // when present, otherwise computed from coordinates.
        let spots: Vec<Spot> = items
            .into_iter()
            .filter_map(|item| {
                let id = item.contentid.parse().ok()?;
                let lng: f64 = item.mapx.parse().ok()?;
                let lat: f64 = item.mapy.parse().ok()?;
                let distance_km = match item.dist.as_deref().and_then(|d| d.parse::<f64>().ok()) {
                    Some(meters) => meters / 1000.0,
                    None => Coordinates::new(lat, lng).ok()?.distance_to(center),
                };
                Some(Spot::new(id, item.title, category, distance_km, 0.0))
            })
            .collect();

        tracing::debug!(
            category = %category,
            "Tourism API returned {} spots",
            spots.len()
        );
        Ok(spots)
    }
}

#[async_trait]
impl TourismProvider for TourApiClient {
    async fn spots_near(&self, center: &Coordinates) -> Result<Vec<Spot>> {
        tracing::info!(
            "Fetching candidate spots around ({:.4}, {:.4})",
            center.lat,
            center.lng
        );

        let fetches = SpotCategory::ALL
            .iter()
            .map(|category| self.fetch_category(center, *category));

        let mut spots = Vec::new();
        for outcome in join_all(fetches).await {
            spots.extend(outcome?);
        }

        // Cafes share the restaurant content type upstream, so the same
        // content id can come back twice.
        spots.sort_by_key(|s| s.id);
        spots.dedup_by_key(|s| s.id);

        Ok(spots)
    }
}

// Tourism API response types

#[derive(Debug, Deserialize)]
struct LocationListResponse {
    response: LocationListInner,
}

#[derive(Debug, Deserialize)]
struct LocationListInner {
    body: LocationListBody,
}

#[derive(Debug, Deserialize)]
struct LocationListBody {
    items: Option<LocationListItems>,
}

#[derive(Debug, Deserialize, Default)]
struct LocationListItems {
    #[serde(default)]
    item: Vec<LocationItem>,
}

#[derive(Debug, Deserialize)]
struct LocationItem {
    contentid: String,
    title: String,
    mapx: String,
    mapy: String,
    #[serde(default)]
    dist: Option<String>,
}
