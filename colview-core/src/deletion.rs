//! Deletion lifecycle: request → confirmation dialog → commit → cleanup.
//!
//! ```text
//! Idle ──request_single──▶ PendingSingle ──┐
//!  ▲  ──request_multiple─▶ PendingMultiple ┼─begin_commit─▶ Committing ──finish_commit──▶ Idle
//!  └──────────────── cancel ◀──────────────┘
//! ```
//!
//! `abort_commit` also returns a `Committing` workflow to `Idle` when the
//! backend's answer will never arrive.
//!
//! The workflow does not re-check permissions; callers only request deletions
//! the availability resolver allowed.

use crate::error::{CollectionViewError, ViewResult};
use crate::SelectionStore;
use async_trait::async_trait;
use colview_model::Record;
use colview_types::{CollectionPath, RecordId};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Failure reported by a [`RecordMutator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeleteFailure {
    pub message: String,
    /// Records the backend deleted before failing. Empty for all-or-nothing backends.
    pub deleted: Vec<RecordId>,
}

impl DeleteFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            deleted: Vec::new(),
        }
    }

    pub fn partial(message: impl Into<String>, deleted: Vec<RecordId>) -> Self {
        Self {
            message: message.into(),
            deleted,
        }
    }
}

/// Backend that actually deletes records.
#[async_trait]
pub trait RecordMutator: Send + Sync {
    async fn delete_records(
        &self,
        path: &CollectionPath,
        records: &[Record],
    ) -> Result<(), DeleteFailure>;
}

/// Records targeted by a deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "records", rename_all = "snake_case")]
pub enum DeletionRequest {
    Single(Record),
    Multiple(Vec<Record>),
}

impl DeletionRequest {
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Single(record) => std::slice::from_ref(record),
            Self::Multiple(records) => records,
        }
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records().iter().map(|r| r.id.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeletionState {
    #[default]
    Idle,
    PendingSingle(Record),
    /// Snapshot of the selection at request time.
    PendingMultiple(Vec<Record>),
    /// The mutation has been dispatched and cannot be cancelled any more.
    Committing(DeletionRequest),
}

/// What the confirmation dialog needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletionDialog {
    pub targets: DeletionRequest,
    pub open: bool,
    /// Confirm was pressed and the backend has not answered yet.
    pub committing: bool,
}

#[derive(Debug, Default)]
pub struct DeletionWorkflow {
    state: DeletionState,
}

impl DeletionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeletionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DeletionState::Idle)
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, DeletionState::Committing(_))
    }

    pub fn request_single(&mut self, record: Record) -> ViewResult<()> {
        self.ensure_idle()?;
        self.state = DeletionState::PendingSingle(record);
        Ok(())
    }

    pub fn request_multiple(&mut self, records: Vec<Record>) -> ViewResult<()> {
        self.ensure_idle()?;
        if records.is_empty() {
            return Err(CollectionViewError::NothingSelected);
        }
        self.state = DeletionState::PendingMultiple(records);
        Ok(())
    }

    /// Closes the dialog without deleting anything. Returns `false` when there
    /// was nothing to cancel, including while a commit is in flight.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            DeletionState::PendingSingle(_) | DeletionState::PendingMultiple(_) => {
                self.state = DeletionState::Idle;
                true
            }
            DeletionState::Idle | DeletionState::Committing(_) => false,
        }
    }

    /// Abandons an in-flight commit whose outcome will never be applied.
    /// The selection is left alone. Returns `false` when nothing was committing.
    pub fn abort_commit(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DeletionState::Committing(request) => {
                warn!(
                    requested = request.records().len(),
                    "Deletion commit abandoned before the backend answered"
                );
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Moves a pending request to `Committing` and returns it for dispatch.
    pub fn begin_commit(&mut self) -> ViewResult<DeletionRequest> {
        let request = match std::mem::take(&mut self.state) {
            DeletionState::PendingSingle(record) => DeletionRequest::Single(record),
            DeletionState::PendingMultiple(records) => DeletionRequest::Multiple(records),
            DeletionState::Idle => return Err(CollectionViewError::NoPendingDeletion),
            committing @ DeletionState::Committing(_) => {
                self.state = committing;
                return Err(CollectionViewError::DeletionInProgress);
            }
        };
        self.state = DeletionState::Committing(request.clone());
        Ok(request)
    }

    /// Applies the backend's answer. The workflow is idle afterwards whatever
    /// the outcome.
    ///
    /// On success a single deletion removes its record from the selection and
    /// a multiple deletion clears the selection. On failure only the requested
    /// records the backend reported as deleted are removed; ids outside the
    /// request are ignored.
    pub fn finish_commit(
        &mut self,
        outcome: Result<(), DeleteFailure>,
        selection: &mut SelectionStore,
    ) -> ViewResult<Vec<RecordId>> {
        let request = match std::mem::take(&mut self.state) {
            DeletionState::Committing(request) => request,
            other => {
                self.state = other;
                return Err(CollectionViewError::NoPendingDeletion);
            }
        };

        match outcome {
            Ok(()) => {
                match &request {
                    DeletionRequest::Single(record) => {
                        selection.remove(record);
                    }
                    DeletionRequest::Multiple(_) => selection.clear(),
                }
                let ids = request.ids();
                info!(count = ids.len(), "Records deleted");
                Ok(ids)
            }
            Err(failure) => {
                let deleted: Vec<Record> = request
                    .records()
                    .iter()
                    .filter(|r| failure.deleted.contains(&r.id))
                    .cloned()
                    .collect();
                warn!(
                    requested = request.records().len(),
                    deleted = deleted.len(),
                    reported = failure.deleted.len(),
                    error = %failure.message,
                    "Record deletion failed"
                );
                selection.remove_all(&deleted);
                Err(CollectionViewError::DeletionCommit {
                    message: failure.message,
                    deleted: deleted.into_iter().map(|r| r.id).collect(),
                })
            }
        }
    }

    /// Commits the pending request through `mutator` and applies the outcome.
    ///
    /// If the returned future is dropped before the backend answers, the
    /// workflow goes back to `Idle` and the selection is untouched.
    pub async fn confirm(
        &mut self,
        mutator: &dyn RecordMutator,
        path: &CollectionPath,
        selection: &mut SelectionStore,
    ) -> ViewResult<Vec<RecordId>> {
        let request = self.begin_commit()?;
        let mut guard = CommitGuard { workflow: self };
        let outcome = mutator.delete_records(path, request.records()).await;
        guard.workflow.finish_commit(outcome, selection)
    }

    pub fn dialog(&self) -> Option<DeletionDialog> {
        let (targets, committing) = match &self.state {
            DeletionState::Idle => return None,
            DeletionState::PendingSingle(record) => (DeletionRequest::Single(record.clone()), false),
            DeletionState::PendingMultiple(records) => (DeletionRequest::Multiple(records.clone()), false),
            DeletionState::Committing(request) => (request.clone(), true),
        };
        Some(DeletionDialog {
            targets,
            open: true,
            committing,
        })
    }

    fn ensure_idle(&self) -> ViewResult<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(CollectionViewError::DeletionInProgress)
        }
    }
}

/// Aborts a commit that is still in flight when dropped.
struct CommitGuard<'a> {
    workflow: &'a mut DeletionWorkflow,
}

impl Drop for CommitGuard<'_> {
    fn drop(&mut self) {
        self.workflow.abort_commit();
    }
}
