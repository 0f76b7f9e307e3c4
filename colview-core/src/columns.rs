//! Column derivation.
//!
//! Columns are a pure function of the configuration, so a view derives them
//! once at construction and reuses them for every render.

use colview_model::{CollectionConfiguration, ConfigError, ConfigResult};
use serde::Serialize;

/// Width of the generated subcollection navigation columns.
pub const SUBCOLLECTION_COLUMN_WIDTH: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    /// A declared schema property.
    Property,
    /// A configuration-supplied computed column.
    Additional,
    /// Opens the named subcollection scoped to the row's record.
    Subcollection { relative_path: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub width: Option<u32>,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl Column {
    pub fn subcollection_id(relative_path: &str) -> String {
        format!("subcollection:{relative_path}")
    }
}

/// Displayed columns: declared display properties in order, then one
/// navigation column per subcollection in declaration order.
pub fn derive_columns(config: &CollectionConfiguration) -> ConfigResult<Vec<Column>> {
    let mut columns = Vec::with_capacity(config.display_properties().len() + config.subcollections.len());

    for key in config.display_properties() {
        let property = config
            .schema
            .property(key)
            .ok_or_else(|| ConfigError::UnknownDisplayProperty {
                collection: config.name.clone(),
                property: key.to_string(),
            })?;
        columns.push(Column {
            id: property.key.clone(),
            title: property.display_title().to_string(),
            width: None,
            kind: ColumnKind::Property,
        });
    }

    for sub in &config.subcollections {
        let relative_path = sub.relative_key();
        if relative_path.is_empty() {
            return Err(ConfigError::MissingRelativePath {
                collection: sub.name.clone(),
            });
        }
        columns.push(Column {
            id: Column::subcollection_id(relative_path),
            title: sub.name.clone(),
            width: Some(SUBCOLLECTION_COLUMN_WIDTH),
            kind: ColumnKind::Subcollection {
                relative_path: relative_path.to_string(),
            },
        });
    }

    Ok(columns)
}

/// Computed columns supplied by the configuration, in declaration order.
pub(crate) fn additional_columns(config: &CollectionConfiguration) -> Vec<Column> {
    config
        .additional_columns
        .iter()
        .map(|c| Column {
            id: c.id.clone(),
            title: c.title.clone(),
            width: c.width,
            kind: ColumnKind::Additional,
        })
        .collect()
}
