//! Collection configuration model.
//!
//! Defines the static description of one logical collection that a
//! collection view is built from:
//! - [`Record`]: one entity instance (id, path, JSON payload)
//! - [`EntitySchema`]: the record type's name and ordered property list
//! - [`Permissions`] / [`Grant`]: declarative create/edit/delete rules
//! - [`CollectionConfiguration`]: schema, permissions, subcollections and
//!   UI switches, loadable from TOML or JSON
//! - [`CollectionSettings`]: the fully-resolved UI switches with defaults
//!
//! These types are read-only to the view layer in `colview-core`.

mod config;
mod error;
mod permissions;
mod record;
mod schema;

pub use config::{
    AdditionalColumn, CollectionConfiguration, CollectionSettings, ColumnRenderer, ExtraAction,
    ExtraActions, ExtraActionsBuilder, FilterCondition, FilterOp, RowSize, SortDirection, SortSpec,
    DEFAULT_PAGE_SIZE,
};
pub use error::{ConfigError, ConfigResult};
pub use permissions::{Actor, Grant, Permissions};
pub use record::Record;
pub use schema::{DataType, EntitySchema, Property};
