//! Assembly of raw MEDLINE records into [`Paper`] values.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::classifier::AffiliationClassifier;
use crate::models::{Author, FieldValue, Paper, RawRecord};

/// Per-record data errors. A record that fails is skipped, never the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// `DP` does not start with a four-digit year
    #[error("Invalid publication date: {value:?}")]
    InvalidDate { value: String },

    /// A required field is absent
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// A field has the wrong shape or content
    #[error("Malformed field {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

/// Normalize the `AD` field into trimmed, non-empty affiliation strings.
///
/// Text is split on `;`; lists are taken element by element. An absent field
/// yields no affiliations.
pub fn process_affiliations(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::Text(text)) => text
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(FieldValue::List(items)) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    }
}

/// Parse the year from a MEDLINE `DP` value such as `"2020 Jan 15"`.
///
/// The result is January 1 of that year.
pub fn parse_publication_year(dp: &str) -> Result<NaiveDate, RecordError> {
    let invalid = || RecordError::InvalidDate {
        value: dp.to_string(),
    };

    let token = dp.split_whitespace().next().ok_or_else(invalid)?;
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year: i32 = token.parse().map_err(|_| invalid())?;
    if year < 1 {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)
}

/// Turns raw records into papers, keeping those with company authors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordAssembler {
    classifier: AffiliationClassifier,
}

impl RecordAssembler {
    pub fn new(classifier: AffiliationClassifier) -> Self {
        Self { classifier }
    }

    /// Assemble one record.
    ///
    /// Returns `Ok(None)` when the record has no company-affiliated author.
    pub fn assemble(&self, record: &RawRecord) -> Result<Option<Paper>, RecordError> {
        let affiliations = process_affiliations(record.get("AD"));

        let names = match record.get("AU") {
            Some(value) => value.to_list(),
            None => Vec::new(),
        };

        let mut authors = Vec::with_capacity(names.len());
        let mut company_affiliations = BTreeSet::new();

        // Author i gets affiliation i; lengths are not required to match
        for (i, name) in names.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                return Err(RecordError::MalformedField {
                    field: "AU",
                    reason: format!("author at position {} has an empty name", i),
                });
            }

            let affiliation = affiliations.get(i).cloned();
            let is_company = self.classifier.classify(affiliation.as_deref());
            let email = affiliation
                .as_deref()
                .and_then(|a| self.classifier.extract_email(a));

            if is_company {
                if let Some(aff) = affiliation.as_ref().filter(|a| !a.is_empty()) {
                    company_affiliations.insert(aff.clone());
                }
            }

            authors.push(Author::new(name, affiliation, email, is_company));
        }

        let publication_date = match record.get("DP") {
            Some(FieldValue::Text(dp)) => parse_publication_year(dp)?,
            Some(FieldValue::List(_)) => {
                return Err(RecordError::MalformedField {
                    field: "DP",
                    reason: "expected a single date value".to_string(),
                })
            }
            None => return Err(RecordError::MissingField { field: "DP" }),
        };

        let paper = Paper::new(
            record.text("PMID").unwrap_or_default(),
            record.text("TI").unwrap_or_default(),
            publication_date,
            authors,
            company_affiliations,
        );

        if paper.has_company_authors() {
            Ok(Some(paper))
        } else {
            Ok(None)
        }
    }

    /// Assemble a batch, skipping records that fail or have no company author.
    ///
    /// Output order follows input order.
    pub fn assemble_all<'a, I>(&self, records: I) -> Vec<Paper>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut papers = Vec::new();
        let mut skipped = 0usize;
        let mut filtered = 0usize;

        for record in records {
            match self.assemble(record) {
                Ok(Some(paper)) => papers.push(paper),
                Ok(None) => {
                    filtered += 1;
                    tracing::debug!(
                        pmid = record.pmid().unwrap_or(""),
                        "No company-affiliated authors, dropping record"
                    );
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        pmid = record.pmid().unwrap_or(""),
                        "Error processing paper: {}",
                        e
                    );
                }
            }
        }

        tracing::debug!(
            kept = papers.len(),
            filtered,
            skipped,
            "Assembled records"
        );

        papers
    }
}
