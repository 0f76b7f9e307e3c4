//! Renderable action groups handed to the table widget.

use crate::{ExportTrigger, MultipleDeleteAvailability};
use colview_model::ExtraAction;
use colview_types::RecordId;
use serde::Serialize;

/// Layout width signalled by the host's responsive breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutWidth {
    #[default]
    Narrow,
    Wide,
}

/// Actions shown on one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowActions {
    pub record_id: RecordId,
    /// `None` when selection is disabled for the collection, otherwise
    /// whether the row is currently selected.
    pub selected: Option<bool>,
    pub edit_enabled: bool,
    pub delete_enabled: bool,
}

impl RowActions {
    pub fn selectable(&self) -> bool {
        self.selected.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteControl {
    pub label: String,
    pub selected: usize,
    pub enabled: bool,
    /// Why the control is disabled; `None` when enabled.
    pub reason: Option<String>,
    pub availability: MultipleDeleteAvailability,
}

impl BulkDeleteControl {
    pub(crate) fn new(selected: usize, availability: MultipleDeleteAvailability) -> Self {
        Self {
            label: format!("Delete ({selected})"),
            selected,
            enabled: availability.is_enabled(),
            reason: availability.reason(),
            availability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum CreateControl {
    /// Icon-only button; the label becomes its tooltip.
    Compact { tooltip: String },
    Labeled { label: String },
}

impl CreateControl {
    pub(crate) fn new(record_type: &str, layout: LayoutWidth) -> Self {
        let text = format!("Add {record_type}");
        match layout {
            LayoutWidth::Narrow => Self::Compact { tooltip: text },
            LayoutWidth::Wide => Self::Labeled { label: text },
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Compact { tooltip } => tooltip,
            Self::Labeled { label } => label,
        }
    }
}

/// Toolbar contents for one render. Controls that must not be shown are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarActions {
    pub extra: Vec<ExtraAction>,
    pub bulk_delete: Option<BulkDeleteControl>,
    pub export: Option<ExportTrigger>,
    pub create: Option<CreateControl>,
}
