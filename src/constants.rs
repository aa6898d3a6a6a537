//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. They should rarely change; anything a
//! deployment may want to tune at runtime is surfaced through
//! [`Config`](crate::config::Config) instead.

// --- Search history defaults ---

/// Maximum retained search terms. Overridden by `HISTORY_CAPACITY`.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

// --- Search result cache defaults ---

/// Default search result cache TTL: 5 minutes. Overridden by
/// `SEARCH_CACHE_TTL`. Mountain search results change rarely, but the TTL is
/// kept short so a stale provider outage result does not stick for a session.
pub const DEFAULT_SEARCH_CACHE_TTL_SECONDS: u64 = 300;

/// Maximum entries for the in-memory search result cache (LRU eviction).
pub const DEFAULT_SEARCH_CACHE_MAX_ENTRIES: u64 = 256;

// --- External provider endpoints (used when env vars are absent) ---

/// Default keyword place-search endpoint.
pub const DEFAULT_SEARCH_BASE_URL: &str =
    "https://dapi.kakao.com/v2/local/search/keyword.json";

/// Default location-based tourism POI endpoint.
pub const DEFAULT_TOUR_BASE_URL: &str =
    "https://apis.data.go.kr/B551011/KorService1/locationBasedList1";

/// Default directions endpoint. The mode profile is appended as a path
/// segment, e.g. `{base}/driving`.
pub const DEFAULT_DIRECTIONS_BASE_URL: &str =
    "https://apis-navi.kakaomobility.com/v1/directions";

// --- Tourism provider structural limits ---

/// Search radius (meters) for candidate spots around a destination mountain.
pub const SPOT_SEARCH_RADIUS_METERS: u32 = 10_000;

/// Maximum candidate spots fetched per category per destination.
pub const SPOT_FETCH_LIMIT_PER_CATEGORY: u32 = 30;
