//! # pubmed-papers
//!
//! Find PubMed papers that have at least one company-affiliated author
//! (pharma, biotech, ...) and export them as a table or CSV.
//!
//! ## Architecture
//!
//! - [`models`]: `Author`, `Paper`, raw MEDLINE records and search queries
//! - [`affiliation`]: keyword classifier and the record assembler
//! - [`sources`]: the `Source` trait, the PubMed E-utilities client and a MEDLINE parser
//! - [`fetcher`]: wires a source to the assembler
//! - [`report`]: table, CSV and JSON output
//! - [`utils`]: HTTP client and retry helpers
//! - [`config`]: configuration management
//!
//! ```no_run
//! use pubmed_papers::{PaperFetcher, PubMedSource, SearchQuery};
//!
//! # async fn run() -> Result<(), pubmed_papers::sources::SourceError> {
//! let fetcher = PaperFetcher::new(PubMedSource::new()?);
//! let papers = fetcher.search_papers(&SearchQuery::new("cancer immunotherapy")).await?;
//! println!("{}", pubmed_papers::report::to_csv_string(&papers).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod affiliation;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use affiliation::{AffiliationClassifier, RecordAssembler, RecordError};
pub use fetcher::PaperFetcher;
pub use models::{Author, Paper, RawRecord, SearchQuery};
pub use sources::{PubMedSource, Source};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
