//! Core data models for papers, authors and raw search records.

mod paper;
mod record;
mod search;

pub use paper::{Author, Paper};
pub use record::{FieldValue, RawRecord};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};
