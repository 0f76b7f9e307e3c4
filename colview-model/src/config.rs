//! Collection configuration: the static, per-collection descriptor a view is
//! built from, plus loading, validation and settings resolution.

use crate::error::{ConfigError, ConfigResult};
use crate::{EntitySchema, Permissions, Record};
use colview_types::CollectionPath;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Page size used when a configuration leaves `page_size` unset.
pub const DEFAULT_PAGE_SIZE: usize = 50;

fn normalize_relative_path(path: &str) -> &str {
    path.trim().trim_matches('/')
}

/// Row density of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSize {
    Xs,
    S,
    #[default]
    M,
    L,
    Xl,
}

/// Comparison operator of an initial filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    ArrayContains,
    ArrayContainsAny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub op: FilterOp,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub property: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Renders the cell of a computed column for one record.
pub type ColumnRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// A computed column appended after the declared properties.
#[derive(Clone)]
pub struct AdditionalColumn {
    pub id: String,
    pub title: String,
    pub width: Option<u32>,
    render: ColumnRenderer,
}

impl AdditionalColumn {
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, width: Option<u32>, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            width,
            render: Arc::new(render),
        }
    }

    pub fn render(&self, record: &Record) -> String {
        (self.render)(record)
    }
}

impl fmt::Debug for AdditionalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdditionalColumn")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// A configuration-supplied toolbar action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraAction {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

/// Builds extra toolbar actions from the collection path and current selection.
pub type ExtraActionsBuilder = Arc<dyn Fn(&CollectionPath, &[Record]) -> Vec<ExtraAction> + Send + Sync>;

#[derive(Clone)]
pub struct ExtraActions(ExtraActionsBuilder);

impl ExtraActions {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&CollectionPath, &[Record]) -> Vec<ExtraAction> + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    pub fn build(&self, path: &CollectionPath, selection: &[Record]) -> Vec<ExtraAction> {
        (self.0)(path, selection)
    }
}

impl fmt::Debug for ExtraActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtraActions(..)")
    }
}

/// Static descriptor of one logical collection.
///
/// Subcollections are collections themselves; their `relative_path` is
/// resolved against the parent record at navigation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfiguration {
    pub name: String,
    #[serde(default)]
    pub relative_path: String,
    pub schema: EntitySchema,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub subcollections: Vec<CollectionConfiguration>,
    /// Display order of declared properties. Defaults to schema order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_editing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_size: Option<RowSize>,
    #[serde(default)]
    pub filterable_properties: Vec<String>,
    #[serde(default)]
    pub initial_filter: BTreeMap<String, FilterCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub additional_columns: Vec<AdditionalColumn>,
    #[serde(skip)]
    pub extra_actions: Option<ExtraActions>,
}

/// Fully-resolved UI switches of a collection.
///
/// Every switch left out of the configuration takes the default shown on
/// [`CollectionSettings::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSettings {
    pub exportable: bool,
    pub inline_editing: bool,
    pub selection_enabled: bool,
    pub pagination: bool,
    pub page_size: usize,
    pub default_size: RowSize,
}

impl Default for CollectionSettings {
    /// All switches on, [`DEFAULT_PAGE_SIZE`] rows per page, medium rows.
    fn default() -> Self {
        Self {
            exportable: true,
            inline_editing: true,
            selection_enabled: true,
            pagination: true,
            page_size: DEFAULT_PAGE_SIZE,
            default_size: RowSize::M,
        }
    }
}

impl CollectionConfiguration {
    pub fn new(name: impl Into<String>, relative_path: impl Into<String>, schema: EntitySchema) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            schema,
            permissions: Permissions::default(),
            subcollections: Vec::new(),
            properties: None,
            exportable: None,
            inline_editing: None,
            selection_enabled: None,
            pagination: None,
            page_size: None,
            default_size: None,
            filterable_properties: Vec::new(),
            initial_filter: BTreeMap::new(),
            initial_sort: None,
            description: None,
            additional_columns: Vec::new(),
            extra_actions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_subcollection(mut self, subcollection: CollectionConfiguration) -> Self {
        self.subcollections.push(subcollection);
        self
    }

    pub fn with_display_properties<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_additional_column(mut self, column: AdditionalColumn) -> Self {
        self.additional_columns.push(column);
        self
    }

    pub fn with_extra_actions(mut self, actions: ExtraActions) -> Self {
        self.extra_actions = Some(actions);
        self
    }

    // ── Loading ──────────────────────────────────────────────────

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
        serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Loads a configuration file. `.json` files are parsed as JSON,
    /// everything else as TOML. The result is validated before it is returned.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_toml_str(&contents)?
        };
        config.validate()?;

        info!(path = %path.display(), collection = %config.name, "Loaded collection configuration");
        Ok(config)
    }

    // ── Resolution ───────────────────────────────────────────────

    /// Resolves the optional UI switches into a fully-populated settings record.
    pub fn settings(&self) -> CollectionSettings {
        let defaults = CollectionSettings::default();
        CollectionSettings {
            exportable: self.exportable.unwrap_or(defaults.exportable),
            inline_editing: self.inline_editing.unwrap_or(defaults.inline_editing),
            selection_enabled: self.selection_enabled.unwrap_or(defaults.selection_enabled),
            pagination: self.pagination.unwrap_or(defaults.pagination),
            page_size: match self.page_size {
                Some(0) => {
                    warn!(collection = %self.name, "page_size 0, using default");
                    defaults.page_size
                }
                Some(n) => n,
                None => defaults.page_size,
            },
            default_size: self.default_size.unwrap_or(defaults.default_size),
        }
    }

    /// Path of this collection when mounted at the top level.
    pub fn path(&self) -> ConfigResult<CollectionPath> {
        if self.relative_path.trim().is_empty() {
            return Err(ConfigError::MissingRelativePath {
                collection: self.name.clone(),
            });
        }
        Ok(CollectionPath::parse(&self.relative_path)?)
    }

    /// Declared display properties in order.
    pub fn display_properties(&self) -> Vec<&str> {
        match &self.properties {
            Some(keys) => keys.iter().map(String::as_str).collect(),
            None => self.schema.keys().collect(),
        }
    }

    /// `relative_path` with surrounding whitespace and slashes removed, the
    /// form used for column ids, lookups and duplicate checks.
    pub fn relative_key(&self) -> &str {
        normalize_relative_path(&self.relative_path)
    }

    pub fn subcollection(&self, relative_path: &str) -> Option<&CollectionConfiguration> {
        let key = normalize_relative_path(relative_path);
        self.subcollections.iter().find(|s| s.relative_key() == key)
    }

    // ── Validation ───────────────────────────────────────────────

    /// Checks this configuration and all nested subcollections for
    /// inconsistencies, returning the first one found.
    pub fn validate(&self) -> ConfigResult<()> {
        self.path()?;

        for key in self.display_properties() {
            if !self.schema.has_property(key) {
                return Err(ConfigError::UnknownDisplayProperty {
                    collection: self.name.clone(),
                    property: key.to_string(),
                });
            }
        }

        let filtered = self
            .filterable_properties
            .iter()
            .chain(self.initial_filter.keys())
            .chain(self.initial_sort.iter().map(|s| &s.property));
        for key in filtered {
            if !self.schema.has_property(key) {
                return Err(ConfigError::UnknownFilterProperty {
                    collection: self.name.clone(),
                    property: key.clone(),
                });
            }
        }

        let mut column_ids: HashSet<&str> = self.schema.keys().collect();
        for column in &self.additional_columns {
            if column.id.trim().is_empty() || !column_ids.insert(column.id.as_str()) {
                return Err(ConfigError::DuplicateColumn {
                    collection: self.name.clone(),
                    column: column.id.clone(),
                });
            }
        }

        let mut seen_paths = HashSet::new();
        for sub in &self.subcollections {
            sub.validate()?;
            if !seen_paths.insert(sub.relative_key()) {
                return Err(ConfigError::DuplicateSubcollection {
                    collection: self.name.clone(),
                    relative_path: sub.relative_key().to_string(),
                });
            }
        }

        debug!(collection = %self.name, "Collection configuration validated");
        Ok(())
    }
}
