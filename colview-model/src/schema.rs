use serde::{Deserialize, Serialize};

/// Describes a record type: its display name and ordered property list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Singular record-type name, used in labels such as "Add Product".
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl EntitySchema {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key == key)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.property(key).is_some()
    }

    /// Property keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.key.as_str())
    }
}

/// One declared property of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data_type: DataType,
    /// Read-only properties are never inline-editable, whatever the permissions say.
    #[serde(default)]
    pub read_only: bool,
}

impl Property {
    fn simple(key: &str, data_type: DataType) -> Self {
        Self {
            key: key.into(),
            title: None,
            data_type,
            read_only: false,
        }
    }

    pub fn string(key: &str) -> Self {
        Self::simple(key, DataType::String)
    }

    pub fn number(key: &str) -> Self {
        Self::simple(key, DataType::Number)
    }

    pub fn boolean(key: &str) -> Self {
        Self::simple(key, DataType::Boolean)
    }

    pub fn timestamp(key: &str) -> Self {
        Self::simple(key, DataType::Timestamp)
    }

    pub fn reference(key: &str) -> Self {
        Self::simple(key, DataType::Reference)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Column header for this property; falls back to the key.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// Value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Timestamp,
    Reference,
    Array,
    Map,
    GeoPoint,
}
