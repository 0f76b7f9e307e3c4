//! Contract with the external table widget.
//!
//! The widget owns fetching, paging, sorting and cell editing. It reads a
//! [`TableWidgetConfig`] once per view and calls back into [`TableBindings`]
//! whenever it renders a row or the toolbar.

use crate::{Column, LayoutWidth, RowActions, ToolbarActions};
use colview_model::{FilterCondition, Record, RowSize, SortSpec};
use colview_types::CollectionPath;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableWidgetConfig {
    pub collection_path: CollectionPath,
    pub title: String,
    pub description: Option<String>,
    pub displayed_columns: Vec<Column>,
    pub additional_columns: Vec<Column>,
    pub filterable_properties: Vec<String>,
    pub initial_filter: BTreeMap<String, FilterCondition>,
    pub initial_sort: Option<SortSpec>,
    pub pagination_enabled: bool,
    pub default_page_size: usize,
    pub default_size: RowSize,
    pub selection_enabled: bool,
}

/// Callbacks the widget invokes while rendering.
pub trait TableBindings {
    fn row_actions(&self, record: &Record) -> RowActions;

    fn toolbar_actions(&self, layout: LayoutWidth) -> ToolbarActions;

    fn on_row_click(&self, record: &Record);

    /// Whether cells of `record` may be edited in place.
    fn inline_edit_guard(&self, record: &Record) -> bool;

    /// Cell content of a computed (additional) column; `None` for unknown ids.
    fn render_cell(&self, column_id: &str, record: &Record) -> Option<String>;
}
