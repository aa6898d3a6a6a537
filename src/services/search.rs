use crate::cache::SearchCache;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::models::{SearchQuery, SearchResult};
use crate::services::providers::SearchProvider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Outcome of one search call. A superseded search produces no observable
/// result: no cache write, no history write, nothing for the UI to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    Superseded,
}

/// Drives one session's searches: normalize, supersede any in-flight search,
/// consult the cache, else call the provider and update cache and history.
///
/// Supersession uses a generation counter rather than locking: every call
/// bumps the generation before suspending, and compares it again when the
/// provider resolves. A resolving call whose generation is stale is discarded
/// wholesale — including its error, if it failed.
pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    cache: SearchCache,
    history: Mutex<HistoryStore>,
    generation: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn SearchProvider>, cache: SearchCache, history: HistoryStore) -> Self {
        SearchOrchestrator {
            provider,
            cache,
            history: Mutex::new(history),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn search(&self, raw_query: &str) -> Result<SearchOutcome> {
        let query = SearchQuery::parse(raw_query)?;

        // Supersede any in-flight search before doing anything observable,
        // including on the cache-hit path.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(cached) = self.cache.get(query.key()) {
            return Ok(SearchOutcome::Results(cached));
        }

        // The provider gets the raw text; it does its own fuzzy matching.
        let fetched = self.provider.search_by_name(query.raw()).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Search superseded, discarding result: {}", query.key());
            return Ok(SearchOutcome::Superseded);
        }

        // Provider failure surfaces only for the current generation, and
        // mutates neither cache nor history.
        let results = fetched?;

        self.cache.insert(query.key(), results.clone());
        self.history
            .lock()
            .expect("history mutex poisoned")
            .record(query.raw());

        Ok(SearchOutcome::Results(results))
    }

    /// Current history terms, most-recent first.
    pub fn history_terms(&self) -> Vec<String> {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .terms()
    }

    pub fn clear_history(&self) {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .clear();
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }
}
