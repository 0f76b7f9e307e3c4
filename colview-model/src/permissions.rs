//! Declarative permission rules.
//!
//! A collection carries one [`Grant`] per action. Grants are plain data so
//! they can live in configuration files; evaluating them against an actor
//! is done by a `PermissionEvaluator` in `colview-core`.

use crate::Record;
use serde::{Deserialize, Serialize};

/// The authenticated identity permission rules are evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Rule deciding whether an action is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    #[default]
    Always,
    Never,
    /// Allowed when the actor holds any of the listed roles.
    Roles(Vec<String>),
    /// Allowed when the record's string value at `field` (a JSON pointer)
    /// equals the actor id. Never allows record-less actions such as create.
    Owner { field: String },
}

impl Grant {
    pub fn allows(&self, actor: &Actor, record: Option<&Record>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Roles(roles) => roles.iter().any(|r| actor.has_role(r)),
            Self::Owner { field } => record
                .and_then(|r| r.get_str(field))
                .is_some_and(|owner| owner == actor.id),
        }
    }
}

/// Per-collection create/edit/delete rules. Anything left out is `Always`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub create: Grant,
    #[serde(default)]
    pub edit: Grant,
    #[serde(default)]
    pub delete: Grant,
}

impl Permissions {
    /// Everything allowed.
    pub fn all() -> Self {
        Self::default()
    }

    /// Nothing allowed.
    pub fn read_only() -> Self {
        Self {
            create: Grant::Never,
            edit: Grant::Never,
            delete: Grant::Never,
        }
    }
}
