//! Error types for configuration loading and validation.

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a collection configuration.
///
/// Everything except `Io` and `Parse` describes an inconsistent
/// configuration and is raised at composition time, before anything is
/// handed to a rendering widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("collection '{collection}' has no relative path")]
    MissingRelativePath { collection: String },

    #[error("invalid path: {0}")]
    InvalidPath(#[from] colview_types::Error),

    #[error("collection '{collection}' declares subcollection '{relative_path}' more than once")]
    DuplicateSubcollection {
        collection: String,
        relative_path: String,
    },

    #[error("collection '{collection}' displays unknown property '{property}'")]
    UnknownDisplayProperty {
        collection: String,
        property: String,
    },

    #[error("collection '{collection}' filters or sorts on unknown property '{property}'")]
    UnknownFilterProperty {
        collection: String,
        property: String,
    },

    #[error("collection '{collection}' has duplicate column id '{column}'")]
    DuplicateColumn { collection: String, column: String },

    #[error("record has no id")]
    MissingRecordId,
}
