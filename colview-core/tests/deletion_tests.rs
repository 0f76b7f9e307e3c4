use async_trait::async_trait;
use colview_core::{
    CollectionViewError, DeleteFailure, DeletionRequest, DeletionState, DeletionWorkflow,
    RecordMutator, SelectionStore,
};
use colview_model::Record;
use colview_types::{CollectionPath, RecordId};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;

fn path() -> CollectionPath {
    CollectionPath::parse("products").unwrap()
}

fn record(id: &str) -> Record {
    Record::new(RecordId::parse(id).unwrap(), path(), json!({}))
}

fn rid(id: &str) -> RecordId {
    RecordId::parse(id).unwrap()
}

fn selection_of(ids: &[&str]) -> SelectionStore {
    let mut store = SelectionStore::new();
    for id in ids {
        store.toggle(record(id));
    }
    store
}

fn selected_ids(store: &SelectionStore) -> Vec<String> {
    store.records().iter().map(|r| r.id.to_string()).collect()
}

/// Backend double that records every call and answers with a canned outcome.
struct FakeBackend {
    outcome: Result<(), DeleteFailure>,
    calls: Mutex<Vec<Vec<RecordId>>>,
}

impl FakeBackend {
    fn ok() -> Self {
        Self {
            outcome: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(failure: DeleteFailure) -> Self {
        Self {
            outcome: Err(failure),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<RecordId>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordMutator for FakeBackend {
    async fn delete_records(&self, _path: &CollectionPath, records: &[Record]) -> Result<(), DeleteFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(records.iter().map(|r| r.id.clone()).collect());
        self.outcome.clone()
    }
}

/// Backend whose answer never arrives.
struct HangingBackend;

#[async_trait]
impl RecordMutator for HangingBackend {
    async fn delete_records(&self, _path: &CollectionPath, _records: &[Record]) -> Result<(), DeleteFailure> {
        std::future::pending().await
    }
}

// ── Requests ─────────────────────────────────────────────────────

#[test]
fn starts_idle_without_dialog() {
    let workflow = DeletionWorkflow::new();
    assert!(workflow.is_idle());
    assert_eq!(workflow.dialog(), None);
}

#[test]
fn request_single_opens_dialog() {
    let mut workflow = DeletionWorkflow::new();
    workflow.request_single(record("a")).unwrap();

    assert_eq!(workflow.state(), &DeletionState::PendingSingle(record("a")));
    let dialog = workflow.dialog().unwrap();
    assert!(dialog.open);
    assert!(!dialog.committing);
    assert_eq!(dialog.targets, DeletionRequest::Single(record("a")));
}

#[test]
fn request_multiple_rejects_empty() {
    let mut workflow = DeletionWorkflow::new();
    assert_eq!(
        workflow.request_multiple(Vec::new()),
        Err(CollectionViewError::NothingSelected)
    );
    assert!(workflow.is_idle());
}

#[test]
fn second_request_while_pending_is_rejected() {
    let mut workflow = DeletionWorkflow::new();
    workflow.request_single(record("a")).unwrap();

    assert_eq!(
        workflow.request_single(record("b")),
        Err(CollectionViewError::DeletionInProgress)
    );
    assert_eq!(
        workflow.request_multiple(vec![record("c")]),
        Err(CollectionViewError::DeletionInProgress)
    );
    assert_eq!(workflow.state(), &DeletionState::PendingSingle(record("a")));
}

#[test]
fn request_multiple_snapshot_ignores_later_selection_changes() {
    let mut selection = selection_of(&["a", "b"]);
    let mut workflow = DeletionWorkflow::new();
    workflow.request_multiple(selection.snapshot()).unwrap();

    selection.toggle(record("c"));
    selection.toggle(record("a"));

    assert_eq!(
        workflow.state(),
        &DeletionState::PendingMultiple(vec![record("a"), record("b")])
    );
}

// ── Cancel ───────────────────────────────────────────────────────

#[test]
fn cancel_returns_to_idle_without_side_effects() {
    let selection = selection_of(&["a", "b"]);
    let before = selected_ids(&selection);
    let revision = selection.revision();

    let mut workflow = DeletionWorkflow::new();
    workflow.request_single(record("a")).unwrap();
    assert!(workflow.cancel());

    assert!(workflow.is_idle());
    assert_eq!(selected_ids(&selection), before);
    assert_eq!(selection.revision(), revision);
}

#[test]
fn cancel_when_idle_is_noop() {
    let mut workflow = DeletionWorkflow::new();
    assert!(!workflow.cancel());
    assert!(workflow.is_idle());
}

// ── Commit ───────────────────────────────────────────────────────

#[test]
fn begin_commit_without_request_fails() {
    let mut workflow = DeletionWorkflow::new();
    assert_eq!(workflow.begin_commit(), Err(CollectionViewError::NoPendingDeletion));
}

#[test]
fn committing_blocks_new_requests_and_cancel() {
    let mut workflow = DeletionWorkflow::new();
    workflow.request_single(record("a")).unwrap();
    let request = workflow.begin_commit().unwrap();
    assert_eq!(request, DeletionRequest::Single(record("a")));

    assert!(workflow.is_committing());
    assert!(workflow.dialog().unwrap().committing);
    assert!(!workflow.cancel());
    assert_eq!(
        workflow.request_single(record("a")),
        Err(CollectionViewError::DeletionInProgress)
    );
    assert_eq!(workflow.begin_commit(), Err(CollectionViewError::DeletionInProgress));
    assert!(workflow.is_committing());
}

#[test]
fn finish_commit_without_commit_fails() {
    let mut workflow = DeletionWorkflow::new();
    workflow.request_single(record("a")).unwrap();
    let mut selection = SelectionStore::new();

    assert_eq!(
        workflow.finish_commit(Ok(()), &mut selection),
        Err(CollectionViewError::NoPendingDeletion)
    );
    assert_eq!(workflow.state(), &DeletionState::PendingSingle(record("a")));
}

#[test]
fn abort_commit_only_applies_while_committing() {
    let mut workflow = DeletionWorkflow::new();
    assert!(!workflow.abort_commit());

    workflow.request_single(record("a")).unwrap();
    assert!(!workflow.abort_commit());
    assert_eq!(workflow.state(), &DeletionState::PendingSingle(record("a")));

    workflow.begin_commit().unwrap();
    assert!(workflow.abort_commit());
    assert!(workflow.is_idle());
}

#[tokio::test]
async fn dropped_confirm_returns_to_idle() {
    let mut selection = selection_of(&["a"]);
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("a")).unwrap();
    let timed_out = tokio::time::timeout(
        Duration::from_millis(20),
        workflow.confirm(&HangingBackend, &path(), &mut selection),
    )
    .await;

    assert!(timed_out.is_err());
    assert!(workflow.is_idle());
    assert_eq!(workflow.dialog(), None);
    // Outcome unknown, so nothing leaves the selection
    assert_eq!(selected_ids(&selection), vec!["a"]);

    let backend = FakeBackend::ok();
    workflow.request_single(record("a")).unwrap();
    workflow.confirm(&backend, &path(), &mut selection).await.unwrap();
    assert!(selection.is_empty());
}

#[tokio::test]
async fn confirm_single_removes_record_from_selection() {
    let mut selection = selection_of(&["a", "b"]);
    let backend = FakeBackend::ok();
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("a")).unwrap();
    let deleted = workflow.confirm(&backend, &path(), &mut selection).await.unwrap();

    assert_eq!(deleted, vec![rid("a")]);
    assert!(workflow.is_idle());
    assert_eq!(selected_ids(&selection), vec!["b"]);
    assert_eq!(backend.calls(), vec![vec![rid("a")]]);
}

#[tokio::test]
async fn confirm_single_of_unselected_record_keeps_selection() {
    let mut selection = selection_of(&["b"]);
    let backend = FakeBackend::ok();
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("z")).unwrap();
    workflow.confirm(&backend, &path(), &mut selection).await.unwrap();

    assert_eq!(selected_ids(&selection), vec!["b"]);
}

#[tokio::test]
async fn confirm_multiple_clears_selection_even_if_it_changed() {
    let mut selection = selection_of(&["a", "b"]);
    let backend = FakeBackend::ok();
    let mut workflow = DeletionWorkflow::new();

    workflow.request_multiple(selection.snapshot()).unwrap();
    selection.toggle(record("c"));

    let deleted = workflow.confirm(&backend, &path(), &mut selection).await.unwrap();
    assert_eq!(deleted, vec![rid("a"), rid("b")]);
    assert!(selection.is_empty());
    assert!(workflow.is_idle());
    // The snapshot was deleted, not the live selection
    assert_eq!(backend.calls(), vec![vec![rid("a"), rid("b")]]);
}

#[tokio::test]
async fn failed_commit_surfaces_error_and_keeps_selection() {
    let mut selection = selection_of(&["a", "b"]);
    let backend = FakeBackend::failing(DeleteFailure::new("backend offline"));
    let mut workflow = DeletionWorkflow::new();

    workflow.request_multiple(selection.snapshot()).unwrap();
    let err = workflow.confirm(&backend, &path(), &mut selection).await.unwrap_err();

    assert_eq!(
        err,
        CollectionViewError::DeletionCommit {
            message: "backend offline".into(),
            deleted: vec![],
        }
    );
    assert!(workflow.is_idle());
    assert_eq!(selected_ids(&selection), vec!["a", "b"]);
}

#[tokio::test]
async fn partial_failure_removes_only_reported_records() {
    let mut selection = selection_of(&["a", "b", "c"]);
    let backend = FakeBackend::failing(DeleteFailure::partial("quota exceeded", vec![rid("a")]));
    let mut workflow = DeletionWorkflow::new();

    workflow.request_multiple(selection.snapshot()).unwrap();
    let err = workflow.confirm(&backend, &path(), &mut selection).await.unwrap_err();

    assert!(matches!(err, CollectionViewError::DeletionCommit { ref deleted, .. } if deleted == &vec![rid("a")]));
    assert_eq!(selected_ids(&selection), vec!["b", "c"]);
    assert!(workflow.is_idle());
}

#[tokio::test]
async fn partial_failure_ignores_ids_outside_the_request() {
    let mut selection = selection_of(&["b"]);
    let backend = FakeBackend::failing(DeleteFailure::partial("boom", vec![rid("b")]));
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("a")).unwrap();
    let err = workflow.confirm(&backend, &path(), &mut selection).await.unwrap_err();

    assert_eq!(
        err,
        CollectionViewError::DeletionCommit {
            message: "boom".into(),
            deleted: vec![],
        }
    );
    assert_eq!(selected_ids(&selection), vec!["b"]);
}

#[tokio::test]
async fn partial_failure_matches_path_as_well_as_id() {
    let archived = Record::new(rid("a"), CollectionPath::parse("archive").unwrap(), json!({}));
    let mut selection = SelectionStore::new();
    selection.toggle(archived.clone());
    selection.toggle(record("a"));
    let backend = FakeBackend::failing(DeleteFailure::partial("boom", vec![rid("a")]));
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("a")).unwrap();
    workflow.confirm(&backend, &path(), &mut selection).await.unwrap_err();

    assert_eq!(selection.records(), &[archived]);
}

#[tokio::test]
async fn workflow_is_reusable_after_commit() {
    let mut selection = SelectionStore::new();
    let backend = FakeBackend::ok();
    let mut workflow = DeletionWorkflow::new();

    workflow.request_single(record("a")).unwrap();
    workflow.confirm(&backend, &path(), &mut selection).await.unwrap();
    workflow.request_single(record("b")).unwrap();
    workflow.confirm(&backend, &path(), &mut selection).await.unwrap();

    assert_eq!(backend.calls().len(), 2);
}
