//! Company vs. academic affiliation classification.

use regex::Regex;
use std::sync::LazyLock;

/// Substrings that mark an affiliation as a company
pub const COMPANY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "therapeutics",
    "biosciences",
    "laboratories",
    "inc",
    "corp",
    "ltd",
    "llc",
    "gmbh",
];

/// Substrings that mark an affiliation as academic; these always win
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academia",
    "hospital",
    "medical center",
    "clinic",
];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid email regex"));

/// Keyword-based affiliation classifier.
///
/// Matching is plain substring containment on the lowercased affiliation, so
/// "inc" also matches "Lincoln". An affiliation is a company when it contains
/// a company keyword and no academic keyword.
#[derive(Debug, Clone, Copy)]
pub struct AffiliationClassifier {
    company_keywords: &'static [&'static str],
    academic_keywords: &'static [&'static str],
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AffiliationClassifier {
    pub const fn new() -> Self {
        Self {
            company_keywords: COMPANY_KEYWORDS,
            academic_keywords: ACADEMIC_KEYWORDS,
        }
    }

    /// Whether an affiliation denotes a company
    pub fn classify(&self, affiliation: Option<&str>) -> bool {
        let Some(affiliation) = affiliation.filter(|a| !a.is_empty()) else {
            return false;
        };

        let lower = affiliation.to_lowercase();
        let has_company = self.company_keywords.iter().any(|k| lower.contains(k));
        let has_academic = self.academic_keywords.iter().any(|k| lower.contains(k));

        has_company && !has_academic
    }

    /// First email address found in `text`
    pub fn extract_email(&self, text: &str) -> Option<String> {
        extract_email(text)
    }
}

/// Whether an affiliation denotes a company, using the built-in keywords
pub fn is_company_affiliation(affiliation: Option<&str>) -> bool {
    AffiliationClassifier::new().classify(affiliation)
}

/// First substring of `text` that looks like an email address, verbatim
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_or_empty_is_not_company() {
        assert!(!is_company_affiliation(None));
        assert!(!is_company_affiliation(Some("")));
    }

    #[test]
    fn test_company_keyword_only() {
        for aff in [
            "Acme Biotech Inc, Boston, MA",
            "Novartis Pharma AG, Basel",
            "Genentech Therapeutics",
            "Roche Diagnostics GmbH, Penzberg",
            "Example LLC",
            "BIOSCIENCES CORP",
        ] {
            assert!(is_company_affiliation(Some(aff)), "{aff}");
        }
    }

    #[test]
    fn test_academic_keyword_only_any_case() {
        for aff in [
            "Harvard University",
            "HARVARD UNIVERSITY",
            "imperial college london",
            "Broad Institute",
            "Mayo Clinic",
            "Boston Medical Center",
            "School of Medicine",
        ] {
            assert!(!is_company_affiliation(Some(aff)), "{aff}");
        }
    }

    #[test]
    fn test_academic_overrides_company() {
        assert!(!is_company_affiliation(Some(
            "Pharma Dept, University Hospital"
        )));
        assert!(!is_company_affiliation(Some(
            "Biotech Institute Ltd"
        )));
    }

    #[test]
    fn test_substring_not_word_match() {
        // "inc" inside "Lincoln" counts as a company keyword
        assert!(is_company_affiliation(Some("Lincoln Road, Springfield")));
        // "school" inside "Preschool" counts as academic
        assert!(!is_company_affiliation(Some("Preschool Pharma")));
    }

    #[test]
    fn test_no_keywords() {
        assert!(!is_company_affiliation(Some("Department of Chemistry, Paris")));
    }

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("Dr. Jane Doe, Acme Biotech Inc, jane.doe@acme-biotech.com"),
            Some("jane.doe@acme-biotech.com".to_string())
        );
    }

    #[test]
    fn test_extract_email_none() {
        assert_eq!(extract_email("Acme Biotech Inc, Boston"), None);
        assert_eq!(extract_email(""), None);
    }

    #[test]
    fn test_extract_email_first_only() {
        assert_eq!(
            extract_email("a.b@one.org; c.d@two.org"),
            Some("a.b@one.org".to_string())
        );
    }

    #[test]
    fn test_extract_email_trailing_period() {
        assert_eq!(
            extract_email("Contact: x_y@lab.example.com."),
            Some("x_y@lab.example.com".to_string())
        );
    }

    #[test]
    fn test_classifier_method_matches_free_function() {
        let classifier = AffiliationClassifier::default();
        assert!(classifier.classify(Some("Acme Corp")));
        assert_eq!(
            classifier.extract_email("mail me: me@corp.io"),
            Some("me@corp.io".to_string())
        );
    }
}
