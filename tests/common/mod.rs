use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use trailplan::config::Config;
use trailplan::error::{PlanError, Result};
use trailplan::history::HistoryBackend;
use trailplan::models::{
    Coordinates, RouteCandidate, SearchResult, Spot, SpotCategory, TransportMode,
};
use trailplan::services::providers::{DirectionsProvider, SearchProvider, TourismProvider};

/// Config for sessions under test; providers are injected so the keys are
/// never used.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        search_api_key: "test-key".to_string(),
        tour_api_key: "test-key".to_string(),
        directions_api_key: "test-key".to_string(),
        search_base_url: None,
        tour_base_url: None,
        directions_base_url: None,
        search_cache_ttl: 300,
        search_cache_max_entries: 64,
        history_capacity: 20,
        history_path: None,
    }
}

#[allow(dead_code)]
pub fn search_result(name: &str) -> SearchResult {
    SearchResult {
        display_name: name.to_string(),
        address: format!("{} address", name),
        map_x: 127.7306,
        map_y: 35.3361,
    }
}

#[allow(dead_code)]
pub fn spot(id: u64, distance_km: f64) -> Spot {
    Spot::new(
        id,
        format!("spot-{}", id),
        SpotCategory::TouristSpot,
        distance_km,
        4.2,
    )
}

/// Search provider answering from a fixed map; unknown queries fail the way
/// a provider outage would.
pub struct FixtureSearchProvider {
    responses: HashMap<String, Vec<SearchResult>>,
    pub calls: AtomicU64,
}

impl FixtureSearchProvider {
    #[allow(dead_code)]
    pub fn new(responses: HashMap<String, Vec<SearchResult>>) -> Self {
        FixtureSearchProvider {
            responses,
            calls: AtomicU64::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn single(query: &str, results: Vec<SearchResult>) -> Self {
        let mut responses = HashMap::new();
        responses.insert(query.to_string(), results);
        Self::new(responses)
    }
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
    async fn search_by_name(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(query)
            .cloned()
            .ok_or_else(|| PlanError::Provider("search provider unavailable".to_string()))
    }
}

/// Search provider whose first call for one designated query blocks until
/// released. Deterministic stand-in for network latency in supersession
/// tests: the test knows when the slow call has started and decides when it
/// resolves.
pub struct GatedSearchProvider {
    inner: FixtureSearchProvider,
    gated_query: String,
    gate_armed: AtomicBool,
    pub started: Arc<Semaphore>,
    pub release: Arc<Semaphore>,
}

impl GatedSearchProvider {
    #[allow(dead_code)]
    pub fn new(gated_query: &str, responses: HashMap<String, Vec<SearchResult>>) -> Self {
        GatedSearchProvider {
            inner: FixtureSearchProvider::new(responses),
            gated_query: gated_query.to_string(),
            gate_armed: AtomicBool::new(true),
            started: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        }
    }
}

#[async_trait]
impl SearchProvider for GatedSearchProvider {
    async fn search_by_name(&self, query: &str) -> Result<Vec<SearchResult>> {
        if query == self.gated_query && self.gate_armed.swap(false, Ordering::SeqCst) {
            self.started.add_permits(1);
            self.release
                .acquire()
                .await
                .expect("release gate closed")
                .forget();
        }
        self.inner.search_by_name(query).await
    }
}

pub struct FixtureTourismProvider {
    spots: Vec<Spot>,
    pub fail: AtomicBool,
}

impl FixtureTourismProvider {
    #[allow(dead_code)]
    pub fn new(spots: Vec<Spot>) -> Self {
        FixtureTourismProvider {
            spots,
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl TourismProvider for FixtureTourismProvider {
    async fn spots_near(&self, _center: &Coordinates) -> Result<Vec<Spot>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlanError::Provider("tourism provider unavailable".to_string()));
        }
        Ok(self.spots.clone())
    }
}

pub struct FixtureDirectionsProvider {
    by_mode: HashMap<TransportMode, Vec<RouteCandidate>>,
}

impl FixtureDirectionsProvider {
    #[allow(dead_code)]
    pub fn new(by_mode: HashMap<TransportMode, Vec<RouteCandidate>>) -> Self {
        FixtureDirectionsProvider { by_mode }
    }

    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl DirectionsProvider for FixtureDirectionsProvider {
    async fn routes(
        &self,
        _origin: &Coordinates,
        _destination: &Coordinates,
        mode: TransportMode,
    ) -> Result<Vec<RouteCandidate>> {
        Ok(self.by_mode.get(&mode).cloned().unwrap_or_default())
    }
}

/// In-memory history backend recording every save for assertions.
pub struct MemoryHistoryBackend {
    initial: Vec<String>,
    fail_load: bool,
    pub saves: Mutex<Vec<Vec<String>>>,
}

impl MemoryHistoryBackend {
    #[allow(dead_code)]
    pub fn new(initial: Vec<String>) -> Self {
        MemoryHistoryBackend {
            initial,
            fail_load: false,
            saves: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn failing() -> Self {
        MemoryHistoryBackend {
            initial: Vec::new(),
            fail_load: true,
            saves: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn last_save(&self) -> Option<Vec<String>> {
        self.saves.lock().unwrap().last().cloned()
    }
}

impl HistoryBackend for MemoryHistoryBackend {
    fn load(&self) -> Result<Vec<String>> {
        if self.fail_load {
            return Err(PlanError::HistoryPersistence("corrupt store".to_string()));
        }
        Ok(self.initial.clone())
    }

    fn save(&self, terms: &[String]) -> Result<()> {
        self.saves.lock().unwrap().push(terms.to_vec());
        Ok(())
    }
}

#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "trailplan=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
