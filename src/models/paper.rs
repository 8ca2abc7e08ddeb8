//! Paper and author models produced by the record assembler.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// An author of a paper, with the result of affiliation classification.
///
/// `is_corresponding` is a heuristic: it is true whenever an email address
/// could be extracted from the author's affiliation. PubMed does not mark the
/// corresponding author explicitly, so presence of an email stands in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    affiliation: Option<String>,
    email: Option<String>,
    is_corresponding: bool,
    is_company_affiliated: bool,
}

impl Author {
    /// Create an author. `is_corresponding` is derived from `email`.
    pub fn new(
        name: impl Into<String>,
        affiliation: Option<String>,
        email: Option<String>,
        is_company_affiliated: bool,
    ) -> Self {
        let is_corresponding = email.is_some();
        Self {
            name: name.into(),
            affiliation,
            email,
            is_corresponding,
            is_company_affiliated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_corresponding(&self) -> bool {
        self.is_corresponding
    }

    pub fn is_company_affiliated(&self) -> bool {
        self.is_company_affiliated
    }
}

/// A PubMed paper with at least one company-affiliated author.
///
/// Only the publication year is known; month and day are always January 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pubmed_id: String,
    title: String,
    publication_date: NaiveDate,
    authors: Vec<Author>,
    company_affiliations: BTreeSet<String>,
}

impl Paper {
    pub fn new(
        pubmed_id: impl Into<String>,
        title: impl Into<String>,
        publication_date: NaiveDate,
        authors: Vec<Author>,
        company_affiliations: BTreeSet<String>,
    ) -> Self {
        Self {
            pubmed_id: pubmed_id.into(),
            title: title.into(),
            publication_date,
            authors,
            company_affiliations,
        }
    }

    /// PubMed identifier (empty when the record carried no PMID)
    pub fn pubmed_id(&self) -> &str {
        &self.pubmed_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }

    /// All authors in the order PubMed listed them
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Distinct affiliations of company-affiliated authors, sorted
    pub fn company_affiliations(&self) -> &BTreeSet<String> {
        &self.company_affiliations
    }

    /// Authors classified as company-affiliated, in author order
    pub fn non_academic_authors(&self) -> Vec<&Author> {
        self.authors
            .iter()
            .filter(|a| a.is_company_affiliated())
            .collect()
    }

    /// Email of the first corresponding author that has a non-empty email
    pub fn corresponding_author_email(&self) -> Option<&str> {
        self.authors
            .iter()
            .filter(|a| a.is_corresponding())
            .find_map(|a| a.email().filter(|e| !e.is_empty()))
    }

    /// Whether the paper satisfies the retention rule
    pub fn has_company_authors(&self) -> bool {
        self.authors.iter().any(Author::is_company_affiliated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    #[test]
    fn test_author_corresponding_follows_email() {
        let with_email = Author::new("Smith J", None, Some("a@b.com".to_string()), false);
        assert!(with_email.is_corresponding());

        let without = Author::new("Doe A", Some("Acme Inc".to_string()), None, true);
        assert!(!without.is_corresponding());
        assert_eq!(without.affiliation(), Some("Acme Inc"));
    }

    #[test]
    fn test_non_academic_authors_keeps_order() {
        let paper = Paper::new(
            "1",
            "T",
            date(2021),
            vec![
                Author::new("C", Some("Gamma Ltd".to_string()), None, true),
                Author::new("A", Some("Some University".to_string()), None, false),
                Author::new("B", Some("Beta Corp".to_string()), None, true),
            ],
            BTreeSet::new(),
        );

        let names: Vec<&str> = paper.non_academic_authors().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert!(paper.has_company_authors());
    }

    #[test]
    fn test_corresponding_author_email_first_match() {
        let paper = Paper::new(
            "2",
            "T",
            date(2019),
            vec![
                Author::new("A", None, None, false),
                Author::new("B", None, Some("b@x.org".to_string()), false),
                Author::new("C", None, Some("c@y.org".to_string()), true),
            ],
            BTreeSet::new(),
        );
        assert_eq!(paper.corresponding_author_email(), Some("b@x.org"));
    }

    #[test]
    fn test_corresponding_author_email_absent() {
        let paper = Paper::new(
            "3",
            "",
            date(2000),
            vec![Author::new("A", None, None, true)],
            BTreeSet::new(),
        );
        assert_eq!(paper.corresponding_author_email(), None);
    }
}
