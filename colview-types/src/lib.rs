//! Core type definitions for collection views.
//!
//! This crate defines the small, domain-agnostic types every other crate in
//! the workspace depends on:
//! - Record and view identifiers
//! - Slash-separated collection paths
//!
//! Schema, permission and configuration types live in `colview-model`.

mod ids;
mod path;

pub use ids::{RecordId, ViewId};
pub use path::CollectionPath;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing identifiers or paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid record id {0:?}: ids must be non-empty and must not contain '/'")]
    InvalidRecordId(String),

    #[error("invalid collection path {0:?}")]
    InvalidPath(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}
