//! The collection view: composes configuration, permissions, selection and
//! the deletion workflow into what a table widget renders.

use crate::actions::{BulkDeleteControl, CreateControl};
use crate::columns::{additional_columns, derive_columns};
use crate::error::{CollectionViewError, ViewAction, ViewResult};
use crate::{
    ActionAvailabilityResolver, Column, DeleteFailure, DeletionDialog, DeletionRequest,
    DeletionState, DeletionWorkflow, ExportTrigger, Exporter, LayoutWidth, NavigationDispatcher, NavigationTarget,
    PermissionEvaluator, RecordMutator, RowActions, SelectionStore, TableBindings,
    TableWidgetConfig, ToolbarActions,
};
use colview_model::{Actor, CollectionConfiguration, CollectionSettings, Record};
use colview_types::{CollectionPath, RecordId, ViewId};
use std::sync::Arc;
use tracing::{debug, info};

/// One rendered view of a collection.
///
/// Selection and deletion state belong to this instance only; a collection
/// and one of its subcollections open side by side share nothing.
pub struct CollectionView {
    id: ViewId,
    config: Arc<CollectionConfiguration>,
    path: CollectionPath,
    settings: CollectionSettings,
    columns: Vec<Column>,
    additional: Vec<Column>,
    evaluator: Arc<dyn PermissionEvaluator>,
    actor: Actor,
    navigator: Arc<dyn NavigationDispatcher>,
    selection: SelectionStore,
    deletion: DeletionWorkflow,
}

impl CollectionView {
    /// Mounts a view of `config` at `path`. Fails fast on an inconsistent configuration.
    pub fn new(
        config: Arc<CollectionConfiguration>,
        path: CollectionPath,
        actor: Actor,
        evaluator: Arc<dyn PermissionEvaluator>,
        navigator: Arc<dyn NavigationDispatcher>,
    ) -> ViewResult<Self> {
        config.validate()?;
        let columns = derive_columns(&config)?;
        let additional = additional_columns(&config);
        let settings = config.settings();
        let id = ViewId::new();

        info!(
            view_id = %id,
            collection = %config.name,
            path = %path,
            columns = columns.len(),
            "Collection view mounted"
        );

        Ok(Self {
            id,
            config,
            path,
            settings,
            columns,
            additional,
            evaluator,
            actor,
            navigator,
            selection: SelectionStore::new(),
            deletion: DeletionWorkflow::new(),
        })
    }

    /// Mounts a top-level view at the configuration's own relative path.
    pub fn mount(
        config: Arc<CollectionConfiguration>,
        actor: Actor,
        evaluator: Arc<dyn PermissionEvaluator>,
        navigator: Arc<dyn NavigationDispatcher>,
    ) -> ViewResult<Self> {
        let path = config.path()?;
        Self::new(config, path, actor, evaluator, navigator)
    }

    /// Opens an independent view of a subcollection of `parent`.
    pub fn open_subcollection(&self, parent: &Record, relative_path: &str) -> ViewResult<CollectionView> {
        let sub = self.find_subcollection(relative_path)?;
        let path = self.path.child(&parent.id, sub.relative_key())?;
        CollectionView::new(
            Arc::new(sub.clone()),
            path,
            self.actor.clone(),
            Arc::clone(&self.evaluator),
            Arc::clone(&self.navigator),
        )
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn path(&self) -> &CollectionPath {
        &self.path
    }

    pub fn config(&self) -> &CollectionConfiguration {
        &self.config
    }

    pub fn settings(&self) -> &CollectionSettings {
        &self.settings
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn displayed_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn deletion_state(&self) -> &DeletionState {
        self.deletion.state()
    }

    pub fn resolver(&self) -> ActionAvailabilityResolver<'_> {
        ActionAvailabilityResolver::new(
            &*self.evaluator,
            &self.config.permissions,
            &self.actor,
            &self.settings,
        )
    }

    pub fn widget_config(&self) -> TableWidgetConfig {
        TableWidgetConfig {
            collection_path: self.path.clone(),
            title: self.config.name.clone(),
            description: self.config.description.clone(),
            displayed_columns: self.columns.clone(),
            additional_columns: self.additional.clone(),
            filterable_properties: self.config.filterable_properties.clone(),
            initial_filter: self.config.initial_filter.clone(),
            initial_sort: self.config.initial_sort.clone(),
            pagination_enabled: self.settings.pagination,
            default_page_size: self.settings.page_size,
            default_size: self.settings.default_size,
            selection_enabled: self.settings.selection_enabled,
        }
    }

    /// Whether `property` of `record` may be edited in place.
    pub fn inline_edit_property_guard(&self, record: &Record, property: &str) -> bool {
        self.inline_edit_guard(record)
            && self
                .config
                .schema
                .property(property)
                .is_some_and(|p| !p.read_only)
    }

    // ── Selection ────────────────────────────────────────────────

    /// Toggles `record` in the selection. Returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, record: Record) -> ViewResult<bool> {
        if !self.settings.selection_enabled {
            return Err(self.denied(ViewAction::Select));
        }
        self.ensure_own(&record)?;
        Ok(self.selection.toggle(record))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Navigation ───────────────────────────────────────────────

    /// Opens the detail view for a new record.
    pub fn on_create_click(&self) -> ViewResult<()> {
        if !self.resolver().create_enabled() {
            return Err(self.denied(ViewAction::Create));
        }
        self.navigator
            .navigate(NavigationTarget::create(&self.config, &self.path));
        Ok(())
    }

    /// Opens the detail view of `record` with `relative_path` selected.
    pub fn on_subcollection_click(&self, record: &Record, relative_path: &str) -> ViewResult<()> {
        let sub = self.find_subcollection(relative_path)?;
        self.navigator.navigate(NavigationTarget::subcollection(
            &self.config,
            &self.path,
            record.id.clone(),
            sub.relative_key(),
        ));
        Ok(())
    }

    // ── Export ───────────────────────────────────────────────────

    pub fn export(&self, exporter: &dyn Exporter) -> ViewResult<()> {
        if !self.settings.exportable {
            return Err(self.denied(ViewAction::Export));
        }
        exporter.export(self.export_trigger());
        Ok(())
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Opens the confirmation dialog for deleting `record`.
    pub fn request_delete(&mut self, record: Record) -> ViewResult<()> {
        self.ensure_own(&record)?;
        if !self.resolver().delete_enabled(&record) {
            return Err(self.denied(ViewAction::Delete));
        }
        self.deletion.request_single(record)
    }

    /// Opens the confirmation dialog for deleting the whole current selection.
    pub fn request_delete_selected(&mut self) -> ViewResult<()> {
        if !self.settings.selection_enabled {
            return Err(self.denied(ViewAction::DeleteMultiple));
        }
        if self.selection.is_empty() {
            return Err(CollectionViewError::NothingSelected);
        }
        if !self.resolver().multiple_delete_enabled(self.selection.records()) {
            return Err(self.denied(ViewAction::DeleteMultiple));
        }
        let snapshot = self.selection.snapshot();
        self.deletion.request_multiple(snapshot)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.deletion.cancel()
    }

    /// Commits the pending deletion through `mutator`. Returns the deleted ids.
    pub async fn confirm_delete(&mut self, mutator: &dyn RecordMutator) -> ViewResult<Vec<RecordId>> {
        debug!(view_id = %self.id, "Confirming deletion");
        self.deletion
            .confirm(mutator, &self.path, &mut self.selection)
            .await
    }

    /// Starts committing the pending deletion and returns the records to hand
    /// to the backend. The view stays usable while the host awaits the
    /// backend; new deletion requests are refused until [`Self::finish_delete`]
    /// or [`Self::abort_delete`].
    pub fn begin_delete(&mut self) -> ViewResult<DeletionRequest> {
        debug!(view_id = %self.id, "Committing deletion");
        self.deletion.begin_commit()
    }

    /// Applies the backend's answer to a commit started with [`Self::begin_delete`].
    pub fn finish_delete(&mut self, outcome: Result<(), DeleteFailure>) -> ViewResult<Vec<RecordId>> {
        self.deletion.finish_commit(outcome, &mut self.selection)
    }

    /// Gives up on a commit whose answer will never be applied.
    pub fn abort_delete(&mut self) -> bool {
        self.deletion.abort_commit()
    }

    pub fn deletion_dialog(&self) -> Option<DeletionDialog> {
        self.deletion.dialog()
    }

    /// Drops selection and any pending or in-flight deletion.
    pub fn unmount(&mut self) {
        if !self.deletion.cancel() {
            self.deletion.abort_commit();
        }
        self.selection.clear();
        info!(view_id = %self.id, "Collection view unmounted");
    }

    fn export_trigger(&self) -> ExportTrigger {
        ExportTrigger {
            schema: self.config.schema.clone(),
            collection_path: self.path.clone(),
        }
    }

    fn find_subcollection(&self, relative_path: &str) -> ViewResult<&CollectionConfiguration> {
        self.config
            .subcollection(relative_path)
            .ok_or_else(|| CollectionViewError::UnknownSubcollection {
                collection: self.config.name.clone(),
                relative_path: relative_path.to_string(),
            })
    }

    fn ensure_own(&self, record: &Record) -> ViewResult<()> {
        if record.path == self.path {
            return Ok(());
        }
        debug!(view_id = %self.id, record = %record.id, path = %record.path, "Record from another collection");
        Err(CollectionViewError::ForeignRecord {
            record: record.id.clone(),
            path: record.path.to_string(),
        })
    }

    fn denied(&self, action: ViewAction) -> CollectionViewError {
        debug!(view_id = %self.id, actor = %self.actor.id, %action, "Action not allowed, ignoring");
        CollectionViewError::PermissionDenied { action }
    }
}

impl TableBindings for CollectionView {
    fn row_actions(&self, record: &Record) -> RowActions {
        let resolver = self.resolver();
        RowActions {
            record_id: record.id.clone(),
            selected: self
                .settings
                .selection_enabled
                .then(|| self.selection.contains(record)),
            edit_enabled: resolver.edit_enabled(record),
            delete_enabled: resolver.delete_enabled(record),
        }
    }

    fn toolbar_actions(&self, layout: LayoutWidth) -> ToolbarActions {
        let resolver = self.resolver();
        let selected = self.selection.records();

        let extra = self
            .config
            .extra_actions
            .as_ref()
            .map(|actions| actions.build(&self.path, selected))
            .unwrap_or_default();
        let bulk_delete = self
            .settings
            .selection_enabled
            .then(|| BulkDeleteControl::new(selected.len(), resolver.multiple_delete(selected)));
        let export = self.settings.exportable.then(|| self.export_trigger());
        let create = resolver
            .create_enabled()
            .then(|| CreateControl::new(&self.config.schema.name, layout));

        ToolbarActions {
            extra,
            bulk_delete,
            export,
            create,
        }
    }

    fn on_row_click(&self, record: &Record) {
        self.navigator.navigate(NavigationTarget::edit(
            &self.config,
            &self.path,
            record.id.clone(),
        ));
    }

    fn inline_edit_guard(&self, record: &Record) -> bool {
        self.resolver().inline_editing_enabled(record)
    }

    fn render_cell(&self, column_id: &str, record: &Record) -> Option<String> {
        self.config
            .additional_columns
            .iter()
            .find(|c| c.id == column_id)
            .map(|c| c.render(record))
    }
}
