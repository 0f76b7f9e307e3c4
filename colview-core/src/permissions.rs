//! Permission predicates.
//!
//! The view never inspects permissions itself; it asks a
//! [`PermissionEvaluator`] supplied at construction. [`RuleEvaluator`] is the
//! stock implementation over the declarative [`Grant`] rules.

use colview_model::{Actor, Permissions, Record};

/// Create/edit/delete predicates. Implementations must be pure.
pub trait PermissionEvaluator: Send + Sync {
    fn can_create(&self, permissions: &Permissions, actor: &Actor) -> bool;

    fn can_edit(&self, permissions: &Permissions, actor: &Actor, record: &Record) -> bool;

    fn can_delete(&self, permissions: &Permissions, actor: &Actor, record: &Record) -> bool;
}

/// Evaluates the [`Grant`](colview_model::Grant) rules stored in the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator;

impl PermissionEvaluator for RuleEvaluator {
    fn can_create(&self, permissions: &Permissions, actor: &Actor) -> bool {
        permissions.create.allows(actor, None)
    }

    fn can_edit(&self, permissions: &Permissions, actor: &Actor, record: &Record) -> bool {
        permissions.edit.allows(actor, Some(record))
    }

    fn can_delete(&self, permissions: &Permissions, actor: &Actor, record: &Record) -> bool {
        permissions.delete.allows(actor, Some(record))
    }
}
