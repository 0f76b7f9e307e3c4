use crate::error::{ConfigError, ConfigResult};
use colview_types::{CollectionPath, RecordId};
use serde::{Deserialize, Serialize};

/// One record shown in a collection view.
///
/// Identity is the `id`; the `values` payload is opaque to the view layer
/// beyond the accessors below, which permission rules and column renderers use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub path: CollectionPath,
    pub values: serde_json::Value,
}

impl Record {
    pub fn new(id: RecordId, path: CollectionPath, values: serde_json::Value) -> Self {
        Self { id, path, values }
    }

    /// Builds a record from a raw JSON document carrying its id in an `"id"` field.
    pub fn from_document(path: CollectionPath, document: serde_json::Value) -> ConfigResult<Self> {
        let id = document
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or(ConfigError::MissingRecordId)?;
        let id = RecordId::parse(id).map_err(|_| ConfigError::MissingRecordId)?;
        Ok(Self {
            id,
            path,
            values: document,
        })
    }

    /// Whether `other` is the same record (same collection, same id).
    pub fn same_identity(&self, other: &Record) -> bool {
        self.id == other.id && self.path == other.path
    }

    /// Extract a string value from `values` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.values.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `values` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.values.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `values` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.values.pointer(pointer).and_then(|v| v.as_f64())
    }
}
