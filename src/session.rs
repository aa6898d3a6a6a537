use crate::cache::SearchCache;
use crate::config::Config;
use crate::error::{PlanError, Result};
use crate::history::{FileHistoryBackend, HistoryBackend, HistoryStore};
use crate::models::{
    Coordinates, Itinerary, ModeComparison, SearchResult, SelectionSet, Spot,
};
use crate::services::modes::ModeComparator;
use crate::services::optimizer;
use crate::services::providers::{DirectionsProvider, SearchProvider, TourismProvider};
use crate::services::search::{SearchOrchestrator, SearchOutcome};
use std::sync::{Arc, Mutex};

/// Coarse-grained planning-session state, mirroring what the UI renders.
/// There is no terminal state; the session is torn down by navigation away
/// from the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    ResultsShown,
    SearchFailed,
    SpotsLoading,
    SpotsShown,
    ModeComparisonShown,
    ItineraryShown,
}

impl SessionState {
    /// States in which the user is working with the candidate spot list.
    /// The comparison and itinerary views are overlays over the spot list,
    /// so spot actions remain available from them.
    fn in_spot_planning(self) -> bool {
        matches!(
            self,
            SessionState::SpotsShown
                | SessionState::ModeComparisonShown
                | SessionState::ItineraryShown
        )
    }
}

/// One user's planning session: owns the search pipeline, the candidate and
/// selected spots, and the mode comparator. All interior state is behind
/// short-lived mutexes never held across an await, so a shared handle can
/// issue overlapping searches and the generation discipline in the
/// orchestrator decides which one lands.
pub struct PlanningSession {
    state: Mutex<SessionState>,
    orchestrator: SearchOrchestrator,
    tourism: Arc<dyn TourismProvider>,
    comparator: ModeComparator,
    selection: Mutex<SelectionSet>,
    destination: Mutex<Option<SearchResult>>,
    candidates: Mutex<Vec<Spot>>,
    results: Mutex<Vec<SearchResult>>,
    history_backend: Option<Arc<dyn HistoryBackend>>,
}

impl PlanningSession {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        tourism: Arc<dyn TourismProvider>,
        directions: Arc<dyn DirectionsProvider>,
        history_backend: Option<Arc<dyn HistoryBackend>>,
        config: &Config,
    ) -> Self {
        // A backend that fails to load does not block the session; the user
        // just starts with empty history.
        let terms = match history_backend.as_deref().map(HistoryBackend::load) {
            Some(Ok(terms)) => terms,
            Some(Err(e)) => {
                tracing::warn!("Failed to load search history, starting empty: {}", e);
                Vec::new()
            }
            None => Vec::new(),
        };
        let history = HistoryStore::from_terms(terms, config.history_capacity);
        let cache = SearchCache::new(config.search_cache_ttl, config.search_cache_max_entries);

        PlanningSession {
            state: Mutex::new(SessionState::Idle),
            orchestrator: SearchOrchestrator::new(search, cache, history),
            tourism,
            comparator: ModeComparator::new(directions),
            selection: Mutex::new(SelectionSet::new()),
            destination: Mutex::new(None),
            candidates: Mutex::new(Vec::new()),
            results: Mutex::new(Vec::new()),
            history_backend,
        }
    }

    /// Convenience constructor wiring the file history backend from config.
    pub fn with_file_history(
        search: Arc<dyn SearchProvider>,
        tourism: Arc<dyn TourismProvider>,
        directions: Arc<dyn DirectionsProvider>,
        config: &Config,
    ) -> Self {
        let backend: Option<Arc<dyn HistoryBackend>> = config
            .history_path
            .clone()
            .map(|path| Arc::new(FileHistoryBackend::new(path)) as Arc<dyn HistoryBackend>);
        Self::new(search, tourism, directions, backend, config)
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().expect("state mutex poisoned")
    }

    fn set_state(&self, state: SessionState) {
        *self.state.lock().expect("state mutex poisoned") = state;
    }

    /// Run a mountain-name search. A query issued while a prior one is in
    /// flight supersedes it: the prior call resolves to
    /// [`SearchOutcome::Superseded`] and leaves no trace in the session, the
    /// cache or the history.
    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome> {
        // Empty input is rejected before the session ever enters Searching,
        // and without superseding an in-flight query.
        if raw_query.trim().is_empty() {
            return Err(PlanError::EmptyQuery);
        }

        self.set_state(SessionState::Searching);

        match self.orchestrator.search(raw_query).await {
            Ok(SearchOutcome::Results(results)) => {
                *self.results.lock().expect("results mutex poisoned") = results.clone();
                self.set_state(SessionState::ResultsShown);
                self.persist_history();
                Ok(SearchOutcome::Results(results))
            }
            Ok(SearchOutcome::Superseded) => {
                // The newer query owns the session state.
                Ok(SearchOutcome::Superseded)
            }
            Err(e) => {
                self.set_state(SessionState::SearchFailed);
                Err(e)
            }
        }
    }

    /// The last applied search results.
    pub fn results(&self) -> Vec<SearchResult> {
        self.results.lock().expect("results mutex poisoned").clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.orchestrator.history_terms()
    }

    pub fn clear_history(&self) {
        self.orchestrator.clear_history();
        self.persist_history();
    }

    /// Pick a destination mountain from the shown results and load candidate
    /// spots around it.
    pub async fn select_destination(&self, result: SearchResult) -> Result<Vec<Spot>> {
        if self.state() != SessionState::ResultsShown {
            return Err(PlanError::InvalidRequest(
                "No search results to select from".to_string(),
            ));
        }

        let center = Coordinates::new(result.map_y, result.map_x)
            .map_err(PlanError::InvalidRequest)?;

        self.set_state(SessionState::SpotsLoading);

        match self.tourism.spots_near(&center).await {
            Ok(spots) => {
                *self.destination.lock().expect("destination mutex poisoned") = Some(result);
                *self.candidates.lock().expect("candidates mutex poisoned") = spots.clone();
                self.selection
                    .lock()
                    .expect("selection mutex poisoned")
                    .clear();
                self.set_state(SessionState::SpotsShown);
                Ok(spots)
            }
            Err(e) => {
                self.set_state(SessionState::ResultsShown);
                Err(e)
            }
        }
    }

    pub fn candidate_spots(&self) -> Vec<Spot> {
        self.candidates
            .lock()
            .expect("candidates mutex poisoned")
            .clone()
    }

    /// Toggle a candidate spot in or out of the selection. Returns whether
    /// the spot is selected after the call.
    pub fn toggle_spot(&self, spot_id: u64) -> Result<bool> {
        if !self.state().in_spot_planning() {
            return Err(PlanError::InvalidRequest(
                "No candidate spots loaded".to_string(),
            ));
        }

        let spot = self
            .candidates
            .lock()
            .expect("candidates mutex poisoned")
            .iter()
            .find(|s| s.id == spot_id)
            .cloned()
            .ok_or_else(|| PlanError::InvalidRequest(format!("Unknown spot id: {}", spot_id)))?;

        let selected = self
            .selection
            .lock()
            .expect("selection mutex poisoned")
            .toggle(spot);
        self.set_state(SessionState::SpotsShown);
        Ok(selected)
    }

    pub fn selected_spot_ids(&self) -> Vec<u64> {
        let selection = self.selection.lock().expect("selection mutex poisoned");
        let mut ids: Vec<u64> = selection.members().map(|s| s.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Compare transport modes from the trip origin to the destination
    /// mountain. Requires at least one selected spot.
    pub async fn request_directions(&self, origin: &Coordinates) -> Result<ModeComparison> {
        if !self.state().in_spot_planning() {
            return Err(PlanError::InvalidRequest(
                "No candidate spots loaded".to_string(),
            ));
        }
        self.selection
            .lock()
            .expect("selection mutex poisoned")
            .require_at_least(1)?;

        let destination = {
            let guard = self.destination.lock().expect("destination mutex poisoned");
            let result = guard.as_ref().ok_or_else(|| {
                PlanError::InvalidRequest("No destination selected".to_string())
            })?;
            Coordinates::new(result.map_y, result.map_x).map_err(PlanError::InvalidRequest)?
        };

        let comparison = self.comparator.compare(origin, &destination).await?;
        self.set_state(SessionState::ModeComparisonShown);
        Ok(comparison)
    }

    /// Compute the visiting order over the current selection. Requires at
    /// least two selected spots.
    pub fn request_optimal_route(&self) -> Result<Itinerary> {
        if !self.state().in_spot_planning() {
            return Err(PlanError::InvalidRequest(
                "No candidate spots loaded".to_string(),
            ));
        }

        let selection = self.selection.lock().expect("selection mutex poisoned");
        selection.require_at_least(2)?;

        let itinerary = optimizer::optimize(&selection);
        drop(selection);

        self.set_state(SessionState::ItineraryShown);
        Ok(itinerary)
    }

    /// Save after every record/clear; a persistence failure is logged, not
    /// surfaced, because the search itself already succeeded.
    fn persist_history(&self) {
        if let Some(backend) = &self.history_backend {
            if let Err(e) = backend.save(&self.orchestrator.history_terms()) {
                tracing::warn!("Failed to persist search history: {}", e);
            }
        }
    }
}
