use crate::constants::*;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// REST key for the keyword place-search provider.
    pub search_api_key: String,
    /// Service key for the tourism POI provider.
    pub tour_api_key: String,
    /// Key for the directions provider.
    pub directions_api_key: String,
    /// Override endpoints, mainly for pointing at a proxy or a test server.
    pub search_base_url: Option<String>,
    pub tour_base_url: Option<String>,
    pub directions_base_url: Option<String>,
    pub search_cache_ttl: u64,
    pub search_cache_max_entries: u64,
    pub history_capacity: usize,
    /// Where the search history file lives; `None` disables persistence.
    pub history_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let history_capacity: usize = env::var("HISTORY_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_HISTORY_CAPACITY.to_string())
            .parse()
            .map_err(|_| "Invalid HISTORY_CAPACITY")?;

        if history_capacity == 0 {
            return Err("HISTORY_CAPACITY must be at least 1".to_string());
        }

        Ok(Config {
            search_api_key: env::var("SEARCH_API_KEY")
                .map_err(|_| "SEARCH_API_KEY must be set")?,
            tour_api_key: env::var("TOUR_API_KEY").map_err(|_| "TOUR_API_KEY must be set")?,
            directions_api_key: env::var("DIRECTIONS_API_KEY")
                .map_err(|_| "DIRECTIONS_API_KEY must be set")?,
            search_base_url: env::var("SEARCH_BASE_URL").ok(),
            tour_base_url: env::var("TOUR_BASE_URL").ok(),
            directions_base_url: env::var("DIRECTIONS_BASE_URL").ok(),
            search_cache_ttl: env::var("SEARCH_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_SEARCH_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid SEARCH_CACHE_TTL")?,
            search_cache_max_entries: env::var("SEARCH_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| DEFAULT_SEARCH_CACHE_MAX_ENTRIES.to_string())
                .parse()
                .map_err(|_| "Invalid SEARCH_CACHE_MAX_ENTRIES")?,
            history_capacity,
            history_path: env::var("HISTORY_PATH").ok().map(PathBuf::from),
        })
    }
}
