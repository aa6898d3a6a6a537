use crate::error::Result;
use crate::models::{Coordinates, ModeComparison, ModeOption, TransportMode};
use crate::services::providers::DirectionsProvider;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Evaluates candidate routes per transport mode for one origin/destination
/// pair. The provider pre-ranks its candidates, so the first per mode is
/// flagged best; the comparator does not re-rank on top of it.
pub struct ModeComparator {
    provider: Arc<dyn DirectionsProvider>,
}

impl ModeComparator {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        ModeComparator { provider }
    }

    /// Query every mode concurrently. Modes with zero candidates are omitted
    /// from the mapping; a provider failure for any mode fails the whole
    /// comparison.
    pub async fn compare(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<ModeComparison> {
        let fetches = TransportMode::ALL
            .iter()
            .map(|mode| async move { (*mode, self.provider.routes(origin, destination, *mode).await) });

        let mut options = BTreeMap::new();
        for (mode, outcome) in join_all(fetches).await {
            let candidates = outcome?;
            if candidates.is_empty() {
                tracing::debug!(mode = %mode, "No candidates, omitting mode");
                continue;
            }

            let ranked: Vec<ModeOption> = candidates
                .into_iter()
                .enumerate()
                .map(|(i, c)| ModeOption {
                    mode,
                    duration_seconds: c.duration_seconds,
                    distance_km: c.distance_km,
                    cost: c.cost,
                    best: i == 0,
                })
                .collect();
            options.insert(mode, ranked);
        }

        tracing::debug!("Mode comparison covers {} modes", options.len());
        Ok(ModeComparison { options })
    }
}
