use crate::error::{PlanError, Result};
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// One hit from the place-search provider. The address is the identity used
/// for downstream routing; the display name may carry sub-peak qualifiers
/// that the normalizer strips when deriving cache/history keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub display_name: String,
    pub address: String,
    pub map_x: f64,
    pub map_y: f64,
}

/// Raw user input paired with its derived normalized key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    key: String,
}

impl SearchQuery {
    /// Rejects input that is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlanError::EmptyQuery);
        }
        Ok(SearchQuery {
            raw: trimmed.to_string(),
            key: normalize(trimmed),
        })
    }

    /// The trimmed literal query, sent to the provider and recorded in
    /// history on success.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized key used for cache lookups.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_rejected() {
        assert!(matches!(SearchQuery::parse(""), Err(PlanError::EmptyQuery)));
        assert!(matches!(
            SearchQuery::parse("   \t "),
            Err(PlanError::EmptyQuery)
        ));
    }

    #[test]
    fn test_query_trims_and_derives_key() {
        let q = SearchQuery::parse("  Jirisan (Cheonwangbong)  ").unwrap();
        assert_eq!(q.raw(), "Jirisan (Cheonwangbong)");
        assert_eq!(q.key(), "Jirisan");
    }
}
