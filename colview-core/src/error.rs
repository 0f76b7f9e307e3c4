//! Error types for the view layer.

use colview_model::ConfigError;
use colview_types::RecordId;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for view operations.
pub type ViewResult<T> = Result<T, CollectionViewError>;

/// User-triggered action that can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAction {
    Create,
    Edit,
    Delete,
    DeleteMultiple,
    Select,
    Export,
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::DeleteMultiple => "delete-multiple",
            Self::Select => "select",
            Self::Export => "export",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in view operations.
///
/// None of these leave the selection or the deletion workflow half-updated:
/// a refused action changes nothing, and a failed commit returns the
/// workflow to idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionViewError {
    /// The configuration is inconsistent; raised while composing the view.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("invalid path: {0}")]
    InvalidPath(#[from] colview_types::Error),

    /// The action is not allowed for this actor. Nothing was changed.
    #[error("permission denied: {action}")]
    PermissionDenied { action: ViewAction },

    #[error("no records selected")]
    NothingSelected,

    /// A deletion is already pending or committing.
    #[error("a deletion is already in progress")]
    DeletionInProgress,

    #[error("no deletion is pending")]
    NoPendingDeletion,

    /// The external mutation failed. `deleted` lists records the backend
    /// reported as deleted before failing.
    #[error("failed to delete records: {message}")]
    DeletionCommit {
        message: String,
        deleted: Vec<RecordId>,
    },

    /// The record lives in another collection than the view's.
    #[error("record '{record}' belongs to '{path}', not to this view")]
    ForeignRecord { record: RecordId, path: String },

    #[error("collection '{collection}' has no subcollection '{relative_path}'")]
    UnknownSubcollection {
        collection: String,
        relative_path: String,
    },
}
