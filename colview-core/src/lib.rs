//! Permission-aware browsing surface for one collection of records.
//!
//! This crate decides *what* a table widget should show and *which* actions
//! are allowed; it never fetches, paints or persists records itself.
//!
//! - [`PermissionEvaluator`]: injected create/edit/delete predicates
//! - [`SelectionStore`]: the view-local multi-selection
//! - [`ActionAvailabilityResolver`]: enabled/disabled state of every action
//! - [`DeletionWorkflow`]: request → confirm/cancel → commit lifecycle
//! - [`CollectionView`]: composes the above for a rendering widget
//!
//! Collaborators that do the real work (routing, exporting, deleting) are
//! traits: [`NavigationDispatcher`], [`Exporter`], [`RecordMutator`].

mod actions;
mod availability;
mod columns;
mod deletion;
mod error;
mod export;
mod navigation;
mod permissions;
mod selection;
mod view;
mod widget;

pub use actions::{BulkDeleteControl, CreateControl, LayoutWidth, RowActions, ToolbarActions};
pub use availability::{ActionAvailabilityResolver, MultipleDeleteAvailability};
pub use columns::{derive_columns, Column, ColumnKind, SUBCOLLECTION_COLUMN_WIDTH};
pub use deletion::{DeleteFailure, DeletionDialog, DeletionRequest, DeletionState, DeletionWorkflow, RecordMutator};
pub use error::{CollectionViewError, ViewAction, ViewResult};
pub use export::{ExportTrigger, Exporter};
pub use navigation::{NavigationDispatcher, NavigationTarget};
pub use permissions::{PermissionEvaluator, RuleEvaluator};
pub use selection::SelectionStore;
pub use view::CollectionView;
pub use widget::{TableBindings, TableWidgetConfig};
