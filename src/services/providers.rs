//! Provider seams consumed by the decision engine.
//!
//! The engine never talks to hard-coded data tables: each external
//! collaborator is an injected trait object with a real HTTP client
//! implementation and in-memory fixtures for tests.

use crate::error::Result;
use crate::models::{Coordinates, RouteCandidate, SearchResult, Spot, TransportMode};
use async_trait::async_trait;

/// Fuzzy mountain-name search. The raw (not normalized) query text is sent;
/// the provider does its own fuzzy matching.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_by_name(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Points of interest around a destination mountain.
#[async_trait]
pub trait TourismProvider: Send + Sync {
    async fn spots_near(&self, center: &Coordinates) -> Result<Vec<Spot>>;
}

/// Candidate routes between two points for one transport mode. An empty list
/// is a valid answer (the mode cannot serve this pair).
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn routes(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TransportMode,
    ) -> Result<Vec<RouteCandidate>>;
}
