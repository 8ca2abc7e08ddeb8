//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{RawRecord, SearchQuery};
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined records, or fails on demand.
#[derive(Debug, Default)]
pub struct MockSource {
    records: Mutex<Vec<RawRecord>>,
    failure: Mutex<Option<String>>,
}

impl MockSource {
    /// Create a new mock source that returns no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source that returns `records`.
    pub fn with_records(records: Vec<RawRecord>) -> Self {
        let source = Self::new();
        source.set_records(records);
        source
    }

    /// Set the records to return.
    pub fn set_records(&self, records: Vec<RawRecord>) {
        let mut guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        *guard = records;
    }

    /// Make every search fail with an API error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        let mut guard = self.failure.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(message.to_string());
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecord>, SourceError> {
        if let Some(message) = self
            .failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(SourceError::Api(message));
        }

        let guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.iter().take(query.max_results).cloned().collect())
    }
}
