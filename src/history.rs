use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use time::OffsetDateTime;

/// Past search terms, most-recent first, unique, capped in size.
///
/// The store holds the user's literal successful query terms (not the
/// provider's canonical names) and deduplicates exact matches by moving them
/// back to the front. Persistence is the surrounding shell's job through
/// [`HistoryBackend`]: load at startup, save after every record/clear.
#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        HistoryStore {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild from persisted terms, most-recent first. Terms beyond the
    /// capacity are dropped, which also shrinks history after a capacity
    /// downgrade.
    pub fn from_terms(terms: Vec<String>, capacity: usize) -> Self {
        let mut store = HistoryStore::new(capacity);
        store.entries = terms.into_iter().take(store.capacity).collect();
        store
    }

    /// Insert a successful search term at the front. An exact existing match
    /// moves to the front instead of duplicating; the oldest entry is evicted
    /// once the capacity is exceeded.
    pub fn record(&mut self, term: &str) {
        if let Some(pos) = self.entries.iter().position(|e| e == term) {
            self.entries.remove(pos);
        }
        self.entries.push_front(term.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Lazy, restartable read of the current order, most-recent first.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot for handing to a [`HistoryBackend`].
    pub fn terms(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// External key-value collaborator persisting history across sessions. The
/// core only defines the in-memory ordering/eviction policy.
pub trait HistoryBackend: Send + Sync {
    /// Persisted terms, most-recent first. A backend with nothing stored yet
    /// returns an empty list, not an error.
    fn load(&self) -> Result<Vec<String>>;
    fn save(&self, terms: &[String]) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    saved_at: OffsetDateTime,
    terms: Vec<String>,
}

/// JSON-file history backend for the app shell.
pub struct FileHistoryBackend {
    path: PathBuf,
}

impl FileHistoryBackend {
    pub fn new(path: PathBuf) -> Self {
        FileHistoryBackend { path }
    }
}

impl HistoryBackend for FileHistoryBackend {
    fn load(&self) -> Result<Vec<String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PlanError::HistoryPersistence(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let file: HistoryFile = serde_json::from_str(&raw).map_err(|e| {
            PlanError::HistoryPersistence(format!(
                "Corrupt history file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(file.terms)
    }

    fn save(&self, terms: &[String]) -> Result<()> {
        let file = HistoryFile {
            saved_at: OffsetDateTime::now_utc(),
            terms: terms.to_vec(),
        };
        let json = serde_json::to_string(&file)
            .map_err(|e| PlanError::HistoryPersistence(format!("Serialize failed: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            PlanError::HistoryPersistence(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
