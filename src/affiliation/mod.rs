//! Affiliation classification and record assembly.
//!
//! - [`AffiliationClassifier`]: keyword rules deciding whether an affiliation
//!   string is a company, plus email extraction
//! - [`RecordAssembler`]: turns raw MEDLINE records into [`Paper`](crate::models::Paper)
//!   values and keeps only papers with a company-affiliated author
//!
//! Authors are paired with affiliations by position in the record. PubMed
//! data where the `AU` and `AD` lists diverge for other reasons will be
//! misattributed; this is a known limitation of the source format.

mod assembler;
mod classifier;

pub use assembler::{parse_publication_year, process_affiliations, RecordAssembler, RecordError};
pub use classifier::{
    extract_email, is_company_affiliation, AffiliationClassifier, ACADEMIC_KEYWORDS,
    COMPANY_KEYWORDS,
};
