//! Action availability.
//!
//! Pure derivation of which actions are enabled for a given actor, record
//! and selection. Nothing here mutates state.

use crate::PermissionEvaluator;
use colview_model::{Actor, CollectionSettings, Permissions, Record};
use colview_types::RecordId;
use serde::Serialize;

/// Whether the selected records can be deleted together, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MultipleDeleteAvailability {
    Allowed { count: usize },
    /// Bulk delete of nothing is never offered.
    NothingSelected,
    /// At least one selected record may not be deleted by this actor.
    ContainsProtected { protected: Vec<RecordId> },
}

impl MultipleDeleteAvailability {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Explanation shown next to a disabled bulk-delete control.
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Allowed { .. } => None,
            Self::NothingSelected => Some("Select one or more records to delete them".to_string()),
            Self::ContainsProtected { protected } if protected.len() == 1 => Some(format!(
                "The selection contains a record you are not allowed to delete ({})",
                protected[0]
            )),
            Self::ContainsProtected { protected } => Some(format!(
                "The selection contains {} records you are not allowed to delete",
                protected.len()
            )),
        }
    }
}

/// Resolves action availability for one collection, actor and settings.
pub struct ActionAvailabilityResolver<'a> {
    evaluator: &'a dyn PermissionEvaluator,
    permissions: &'a Permissions,
    actor: &'a Actor,
    settings: &'a CollectionSettings,
}

impl<'a> ActionAvailabilityResolver<'a> {
    pub fn new(
        evaluator: &'a dyn PermissionEvaluator,
        permissions: &'a Permissions,
        actor: &'a Actor,
        settings: &'a CollectionSettings,
    ) -> Self {
        Self {
            evaluator,
            permissions,
            actor,
            settings,
        }
    }

    pub fn create_enabled(&self) -> bool {
        self.evaluator.can_create(self.permissions, self.actor)
    }

    pub fn edit_enabled(&self, record: &Record) -> bool {
        self.evaluator.can_edit(self.permissions, self.actor, record)
    }

    pub fn delete_enabled(&self, record: &Record) -> bool {
        self.evaluator.can_delete(self.permissions, self.actor, record)
    }

    pub fn inline_editing_enabled(&self, record: &Record) -> bool {
        self.settings.inline_editing && self.edit_enabled(record)
    }

    pub fn multiple_delete(&self, selection: &[Record]) -> MultipleDeleteAvailability {
        if selection.is_empty() {
            return MultipleDeleteAvailability::NothingSelected;
        }

        let protected: Vec<RecordId> = selection
            .iter()
            .filter(|r| !self.delete_enabled(r))
            .map(|r| r.id.clone())
            .collect();

        if protected.is_empty() {
            MultipleDeleteAvailability::Allowed {
                count: selection.len(),
            }
        } else {
            MultipleDeleteAvailability::ContainsProtected { protected }
        }
    }

    pub fn multiple_delete_enabled(&self, selection: &[Record]) -> bool {
        self.multiple_delete(selection).is_enabled()
    }
}
