//! Literature search sources.
//!
//! A [`Source`] turns a [`SearchQuery`] into raw MEDLINE records. The only
//! production source is [`PubMedSource`], which talks to NCBI E-utilities in
//! two sequential calls: `esearch` for the matching PubMed IDs, then `efetch`
//! for the records in MEDLINE text format. [`MockSource`] returns canned
//! records for tests.
//!
//! Sources never interpret record content; that is the job of the
//! [`RecordAssembler`](crate::affiliation::RecordAssembler).

pub mod medline;
pub mod mock;
mod pubmed;

pub use medline::parse_medline;
pub use mock::MockSource;
pub use pubmed::{PubMedSource, DEFAULT_EUTILS_BASE_URL, EFETCH_GET_ID_LIMIT};

use crate::models::{RawRecord, SearchQuery};
use async_trait::async_trait;

/// Interface for literature search backends.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search and return the matching raw records.
    ///
    /// No matches is `Ok` with an empty vector, not an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecord>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, MEDLINE, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// Non-success response from the service
    #[error("API error: {0}")]
    Api(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for SourceError {
    fn from(err: quick_xml::DeError) -> Self {
        SourceError::Parse(format!("XML: {}", err))
    }
}
