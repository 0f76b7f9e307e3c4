use crate::{Error, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slash-separated path of a collection in the backing store
/// (e.g. `products` or `products/p-17/locales`).
///
/// Leading and trailing slashes are stripped on parse; empty segments are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() || trimmed.split('/').any(|seg| seg.trim().is_empty()) {
            return Err(Error::InvalidPath(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment of the path (the collection's own relative path).
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Path of a subcollection nested under `record` in this collection.
    pub fn child(&self, record: &RecordId, relative_path: &str) -> Result<Self, Error> {
        let relative = Self::parse(relative_path)?;
        Ok(Self(format!("{}/{}/{}", self.0, record, relative.0)))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CollectionPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CollectionPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self {
        path.0
    }
}
