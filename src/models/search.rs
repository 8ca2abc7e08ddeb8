//! Search query model.

use serde::{Deserialize, Serialize};

/// Default bound on the number of PubMed IDs fetched per search
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// A literature search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// PubMed query string, passed through verbatim (supports PubMed syntax)
    pub query: String,

    /// Maximum number of records to fetch
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the maximum number of results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}
