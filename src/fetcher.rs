//! Search-and-filter pipeline: query -> raw records -> company-affiliated papers.

use crate::affiliation::RecordAssembler;
use crate::models::{Paper, SearchQuery};
use crate::sources::{Source, SourceError};

/// Runs a search against a [`Source`] and keeps the papers that have at
/// least one company-affiliated author.
///
/// Source failures propagate; malformed records are logged and skipped.
#[derive(Debug)]
pub struct PaperFetcher<S> {
    source: S,
    assembler: RecordAssembler,
}

impl<S: Source> PaperFetcher<S> {
    pub fn new(source: S) -> Self {
        Self::with_assembler(source, RecordAssembler::default())
    }

    pub fn with_assembler(source: S, assembler: RecordAssembler) -> Self {
        Self { source, assembler }
    }

    /// Search and return papers with company-affiliated authors, in source order
    pub async fn search_papers(&self, query: &SearchQuery) -> Result<Vec<Paper>, SourceError> {
        let records = self.source.search(query).await?;
        tracing::info!(
            "Retrieved {} records from {}",
            records.len(),
            self.source.name()
        );

        let papers = self.assembler.assemble_all(&records);
        tracing::info!(
            "{} of {} papers have company-affiliated authors",
            papers.len(),
            records.len()
        );

        Ok(papers)
    }
}
