//! Raw MEDLINE records as delivered by a search source.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Value of a single MEDLINE field.
///
/// Single-valued tags such as `TI` or `DP` are text; repeatable tags such as
/// `AU` or `AD` are lists with one element per occurrence. When loaded from
/// JSON, any other shape (null, numbers, mixed arrays) becomes an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Text(String),
            List(Vec<String>),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::Text(s) => FieldValue::Text(s),
            Shape::List(items) => FieldValue::List(items),
            Shape::Other(_) => FieldValue::List(Vec::new()),
        })
    }
}

impl FieldValue {
    /// The value as text, if it is single-valued
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The value as a list of strings (text becomes a single element)
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(String::from).collect())
    }
}

/// One MEDLINE record: field code to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures
    pub fn with(mut self, code: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(code, value);
        self
    }

    pub fn insert(&mut self, code: &str, value: impl Into<FieldValue>) {
        self.fields.insert(code.to_string(), value.into());
    }

    pub fn get(&self, code: &str) -> Option<&FieldValue> {
        self.fields.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(code)
    }

    /// Text value of a field, `None` if absent or list-valued
    pub fn text(&self, code: &str) -> Option<&str> {
        self.get(code).and_then(FieldValue::as_text)
    }

    /// PMID if present; used to label log messages
    pub fn pmid(&self) -> Option<&str> {
        self.text("PMID")
    }

    pub fn contains(&self, code: &str) -> bool {
        self.fields.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
