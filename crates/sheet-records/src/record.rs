//! Record types decoded from the remote source

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Name of the field carrying the record identifier
const ID_FIELD: &str = "id";

/// Errors produced while decoding a response body into records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },

    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// `index` is the position in the response array, when known
    #[error("{} has no \"id\" field", describe(.index))]
    MissingId { index: Option<usize> },

    #[error("{} has an \"id\" that is neither a string nor a number", describe(.index))]
    InvalidId { index: Option<usize> },
}

fn describe(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!("record {}", index),
        None => "record".to_string(),
    }
}

/// Stable unique identifier of a record, as sent by the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    Number(Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl RecordId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(RecordId::Number(n.clone())),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

/// One row of source data
///
/// The full object is kept, including `id` and any fields the table does
/// not render, because search looks at every field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object, requiring a string or number `id`
    pub fn from_object(fields: Map<String, Value>) -> Result<Self, RecordError> {
        Self::from_indexed_object(None, fields)
    }

    fn from_indexed_object(index: Option<usize>, fields: Map<String, Value>) -> Result<Self, RecordError> {
        let id = fields
            .get(ID_FIELD)
            .ok_or(RecordError::MissingId { index })?;
        let id = RecordId::from_value(id).ok_or(RecordError::InvalidId { index })?;
        Ok(Self { id, fields })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Raw value of a field, if present
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Display text of a field; missing and null fields render as empty
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(field_text)
            .map(Cow::into_owned)
            .unwrap_or_default()
    }

    /// All field values in source order, `id` included
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = RecordError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Record::from_object(fields)
    }
}

/// Textual form of a field value as used for display and search
///
/// Null has no textual form. Arrays and objects are not expected from the
/// source but are tolerated and rendered as compact JSON.
pub fn field_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Array(_) | Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

/// Decode a response body into records, preserving source order
///
/// The body must be a JSON array whose elements are objects with an `id`.
pub fn decode_records(body: &[u8]) -> Result<Vec<Record>, RecordError> {
    let value: Value = serde_json::from_slice(body)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(RecordError::NotAnArray {
                found: json_kind(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Record::from_indexed_object(Some(index), fields),
            _ => Err(RecordError::NotAnObject { index }),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
