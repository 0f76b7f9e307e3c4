//! Resolution report for the `colview` inspection binary.

use anyhow::{Context, Result};
use colview_core::{
    CollectionView, LayoutWidth, NavigationDispatcher, NavigationTarget, RowActions, RuleEvaluator,
    TableBindings, TableWidgetConfig, ToolbarActions,
};
use colview_model::{Actor, CollectionConfiguration, CollectionSettings, Record};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Navigator that only logs; the inspector has nowhere to navigate to.
pub struct LoggingNavigator;

impl NavigationDispatcher for LoggingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        info!(
            path = %target.collection_path,
            entity_id = ?target.entity_id.as_ref().map(|id| id.to_string()),
            subcollection = ?target.selected_subcollection,
            "Navigation requested"
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub collection: String,
    pub actor: Actor,
    pub settings: CollectionSettings,
    pub create_enabled: bool,
    pub widget: TableWidgetConfig,
    pub rows: Vec<RowActions>,
    pub toolbar: ToolbarActions,
}

/// Reads a JSON array of documents, each carrying an `"id"` field.
pub fn load_records(config: &CollectionConfiguration, path: &Path) -> Result<Vec<Record>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {}", path.display()))?;
    let documents: Vec<serde_json::Value> =
        serde_json::from_str(&contents).context("records file must be a JSON array")?;
    let collection_path = config.path()?;

    documents
        .into_iter()
        .enumerate()
        .map(|(idx, doc)| {
            Record::from_document(collection_path.clone(), doc)
                .with_context(|| format!("record #{idx} is invalid"))
        })
        .collect()
}

/// Mounts a view of `config` for `actor`, selects `selected` ids among
/// `records`, and reports what the widget would be told.
pub fn inspect(
    config: CollectionConfiguration,
    actor: Actor,
    records: &[Record],
    selected: &[String],
    layout: LayoutWidth,
) -> Result<InspectReport> {
    let mut view = CollectionView::mount(
        Arc::new(config),
        actor,
        Arc::new(RuleEvaluator),
        Arc::new(LoggingNavigator),
    )?;

    for id in selected {
        let record = records
            .iter()
            .find(|r| r.id.as_str() == id)
            .with_context(|| format!("cannot select unknown record '{id}'"))?;
        view.toggle_selection(record.clone())?;
    }

    let rows = records.iter().map(|r| view.row_actions(r)).collect();
    Ok(InspectReport {
        collection: view.config().name.clone(),
        actor: view.actor().clone(),
        settings: *view.settings(),
        create_enabled: view.resolver().create_enabled(),
        widget: view.widget_config(),
        rows,
        toolbar: view.toolbar_actions(layout),
    })
}
