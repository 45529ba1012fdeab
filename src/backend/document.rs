//! Structured document produced by lowering.
//!
//! [`Document`] is a JSON-shaped tree with two properties `serde_json::Value` lacks:
//!
//! - object keys keep insertion order (fixed-shape records are written in a fixed field order, object constructors
//!   in first-occurrence order);
//! - numbers are raw binary64 values, so a non-finite number survives lowering and fails at serialization time
//!   instead of turning into `null`.
//!
//! Documents are built with [`Record`] and the `From` conversions below.

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use infragen_core::vocab::tags::{self, TagId};

#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Explicit absence, also the marker for unrepresentable expressions.
    Null,
    Bool(bool),
    Number(f64),
    Integer(i64),
    String(String),
    Array(Vec<Document>),
    Object(IndexMap<String, Document>),
}

impl Document {
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Field lookup on objects.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Document>> {
        match self {
            Document::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The `"type"` tag of a record, if any.
    pub fn tag(&self) -> Option<&str> {
        self.get("type").and_then(Document::as_str)
    }

    /// First number in the tree (depth-first) that JSON cannot represent.
    pub fn first_non_finite(&self) -> Option<f64> {
        match self {
            Document::Number(n) if !n.is_finite() => Some(*n),
            Document::Array(items) => items.iter().find_map(Document::first_non_finite),
            Document::Object(fields) => fields.values().find_map(Document::first_non_finite),
            _ => None,
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Document::Number(n) => Err(S::Error::custom(format!("unsupported value: {}", n))),
            Document::Integer(i) => serializer.serialize_i64(*i),
            Document::String(s) => serializer.serialize_str(s),
            Document::Array(items) => serializer.collect_seq(items),
            Document::Object(fields) => serializer.collect_map(fields),
        }
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Bool(value)
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Number(value)
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Integer(value)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(value)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Array(items)
    }
}

impl From<IndexMap<String, Document>> for Document {
    fn from(fields: IndexMap<String, Document>) -> Self {
        Document::Object(fields)
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(value: Option<T>) -> Self {
        value.map_or(Document::Null, Into::into)
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Document::Array(iter.into_iter().collect())
    }
}

/// Builder for fixed-shape records. Fields serialize in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct Record(IndexMap<String, Document>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record whose first field is `"type": <tag>`.
    pub fn tagged(tag: TagId) -> Self {
        Self::new().field("type", tags::as_str(tag))
    }

    pub fn field(mut self, key: &str, value: impl Into<Document>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Add the field only when `value` is present.
    pub fn field_if(self, key: &str, value: Option<impl Into<Document>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }
}

impl From<Record> for Document {
    fn from(record: Record) -> Self {
        Document::Object(record.0)
    }
}
