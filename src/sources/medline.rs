//! Parser for the MEDLINE text format returned by
//! `efetch.fcgi?db=pubmed&rettype=medline&retmode=text`.
//!
//! ```text
//! PMID- 31452104
//! TI  - A long title that wraps onto
//!       a continuation line.
//! AU  - Smith J
//! AD  - Acme Biotech Inc, Boston, MA, USA.
//! ```
//!
//! Records are separated by blank lines.

use crate::models::{FieldValue, RawRecord};

/// Tags that hold a single text value. Every other tag is a list.
const TEXT_FIELDS: &[&str] = &[
    "ID", "PMID", "SO", "RF", "NI", "JC", "TA", "IS", "CY", "TT", "CA", "IP", "VI", "DP", "YR",
    "PG", "LID", "DA", "LR", "OWN", "STAT", "DCOM", "PUBM", "DEP", "PL", "JID", "SB", "PMC",
    "EDAT", "MHDA", "PST", "AB", "EA", "TI", "JT",
];

fn is_text_field(tag: &str) -> bool {
    TEXT_FIELDS.contains(&tag)
}

/// Split a field line into `(tag, value)`. The tag occupies the first four
/// columns, followed by `"- "`.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 5 || bytes[4] != b'-' || !line.is_char_boundary(4) {
        return None;
    }
    let tag = line[..4].trim_end();
    if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let value = line[5..].strip_prefix(' ').unwrap_or(&line[5..]);
    Some((tag, value.trim_end()))
}

fn append(target: &mut String, more: &str) {
    if more.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(more);
}

/// Accumulates the fields of the record currently being parsed.
#[derive(Default)]
struct RecordBuilder {
    record: RawRecord,
    last_tag: Option<String>,
}

impl RecordBuilder {
    fn add_field(&mut self, tag: &str, value: &str) {
        if is_text_field(tag) {
            match self.record.get_mut(tag) {
                Some(FieldValue::Text(existing)) => append(existing, value),
                _ => self.record.insert(tag, value),
            }
        } else {
            match self.record.get_mut(tag) {
                Some(FieldValue::List(items)) => items.push(value.to_string()),
                _ => self.record.insert(tag, vec![value.to_string()]),
            }
        }
        self.last_tag = Some(tag.to_string());
    }

    fn continue_field(&mut self, value: &str) -> bool {
        let Some(tag) = self.last_tag.as_deref() else {
            return false;
        };
        match self.record.get_mut(tag) {
            Some(FieldValue::Text(existing)) => append(existing, value),
            Some(FieldValue::List(items)) => match items.last_mut() {
                Some(last) => append(last, value),
                None => return false,
            },
            None => return false,
        }
        true
    }

    fn finish(&mut self) -> Option<RawRecord> {
        self.last_tag = None;
        let record = std::mem::take(&mut self.record);
        (!record.is_empty()).then_some(record)
    }
}

/// Parse MEDLINE text into records, in input order.
pub fn parse_medline(text: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut builder = RecordBuilder::default();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            records.extend(builder.finish());
            continue;
        }

        if let Some(rest) = line.strip_prefix("      ") {
            if !builder.continue_field(rest.trim()) {
                tracing::debug!("Continuation line without a field: {:?}", line);
            }
            continue;
        }

        match split_field_line(line) {
            Some((tag, value)) => builder.add_field(tag, value),
            None => tracing::debug!("Skipping unrecognised MEDLINE line: {:?}", line),
        }
    }

    records.extend(builder.finish());
    records
}
