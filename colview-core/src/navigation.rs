use colview_model::{CollectionConfiguration, EntitySchema, Permissions};
use colview_types::{CollectionPath, RecordId};

/// Where a detail view or subcollection view should open.
///
/// `entity_id` is `None` for "create a new record".
#[derive(Debug, Clone)]
pub struct NavigationTarget {
    pub collection_path: CollectionPath,
    pub entity_id: Option<RecordId>,
    pub schema: EntitySchema,
    pub permissions: Permissions,
    pub subcollections: Vec<CollectionConfiguration>,
    pub selected_subcollection: Option<String>,
}

impl NavigationTarget {
    fn base(config: &CollectionConfiguration, path: &CollectionPath) -> Self {
        Self {
            collection_path: path.clone(),
            entity_id: None,
            schema: config.schema.clone(),
            permissions: config.permissions.clone(),
            subcollections: config.subcollections.clone(),
            selected_subcollection: None,
        }
    }

    pub fn create(config: &CollectionConfiguration, path: &CollectionPath) -> Self {
        Self::base(config, path)
    }

    pub fn edit(config: &CollectionConfiguration, path: &CollectionPath, entity_id: RecordId) -> Self {
        Self {
            entity_id: Some(entity_id),
            ..Self::base(config, path)
        }
    }

    pub fn subcollection(
        config: &CollectionConfiguration,
        path: &CollectionPath,
        entity_id: RecordId,
        relative_path: &str,
    ) -> Self {
        Self {
            entity_id: Some(entity_id),
            selected_subcollection: Some(relative_path.to_string()),
            ..Self::base(config, path)
        }
    }

    pub fn is_new_record(&self) -> bool {
        self.entity_id.is_none()
    }
}

/// Side panel / router that opens detail and subcollection views.
pub trait NavigationDispatcher: Send + Sync {
    fn navigate(&self, target: NavigationTarget);
}
