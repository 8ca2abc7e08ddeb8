//! Tabular output of papers: console table, CSV and JSON.
//!
//! Every renderer uses the same six [`Column`]s, in this order:
//!
//! | Column | Value |
//! |---|---|
//! | PubmedID | PubMed identifier |
//! | Title | title |
//! | Publication Date | `YYYY-01-01` (year precision) |
//! | Non-academic Author(s) | company-affiliated author names, `; `-joined |
//! | Company Affiliation(s) | distinct company affiliations, sorted, `; `-joined |
//! | Corresponding Author Email | first extracted email, or empty |

use comfy_table::{presets, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

use crate::models::Paper;

/// Separator between names or affiliations inside one cell
pub const LIST_SEPARATOR: &str = "; ";

/// A logical output column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    PubmedId,
    Title,
    PublicationDate,
    NonAcademicAuthors,
    CompanyAffiliations,
    CorrespondingAuthorEmail,
}

impl Column {
    /// All columns in output order
    pub const ALL: [Column; 6] = [
        Column::PubmedId,
        Column::Title,
        Column::PublicationDate,
        Column::NonAcademicAuthors,
        Column::CompanyAffiliations,
        Column::CorrespondingAuthorEmail,
    ];

    /// Header text
    pub fn header(&self) -> &'static str {
        match self {
            Column::PubmedId => "PubmedID",
            Column::Title => "Title",
            Column::PublicationDate => "Publication Date",
            Column::NonAcademicAuthors => "Non-academic Author(s)",
            Column::CompanyAffiliations => "Company Affiliation(s)",
            Column::CorrespondingAuthorEmail => "Corresponding Author Email",
        }
    }

    /// Cell value for a paper
    pub fn value(&self, paper: &Paper) -> String {
        match self {
            Column::PubmedId => paper.pubmed_id().to_string(),
            Column::Title => paper.title().to_string(),
            Column::PublicationDate => paper.publication_date().format("%Y-%m-%d").to_string(),
            Column::NonAcademicAuthors => paper
                .non_academic_authors()
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            Column::CompanyAffiliations => paper
                .company_affiliations()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            Column::CorrespondingAuthorEmail => paper
                .corresponding_author_email()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// One output row, keyed by header name when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl From<&Paper> for ReportRow {
    fn from(paper: &Paper) -> Self {
        Self {
            pubmed_id: Column::PubmedId.value(paper),
            title: Column::Title.value(paper),
            publication_date: Column::PublicationDate.value(paper),
            non_academic_authors: Column::NonAcademicAuthors.value(paper),
            company_affiliations: Column::CompanyAffiliations.value(paper),
            corresponding_author_email: Column::CorrespondingAuthorEmail.value(paper),
        }
    }
}

/// Convert papers to rows
pub fn rows(papers: &[Paper]) -> Vec<ReportRow> {
    papers.iter().map(ReportRow::from).collect()
}

/// Write papers as CSV with a header row.
///
/// The header is written even when `papers` is empty.
pub fn write_csv<W: Write>(papers: &[Paper], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(Column::ALL.iter().map(|c| c.header()))?;
    for paper in papers {
        wtr.write_record(Column::ALL.iter().map(|c| c.value(paper)))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render papers as CSV text
pub fn to_csv_string(papers: &[Paper]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(papers, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Render papers as a console table fitted to `width` columns
pub fn render_table(papers: &[Paper], width: u16) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width)
        .set_header(Column::ALL.iter().map(|c| Cell::new(c.header())));

    for paper in papers {
        table.add_row(Column::ALL.iter().map(|c| Cell::new(c.value(paper))));
    }

    table.to_string()
}

/// Render papers as a pretty-printed JSON array of rows
pub fn render_json(papers: &[Paper]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&rows(papers))
}

/// Current terminal width, or 120 when it cannot be determined
pub fn terminal_width() -> u16 {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0)
        .unwrap_or(120)
}
