use colview_model::EntitySchema;
use colview_types::CollectionPath;
use serde::Serialize;

/// Everything an exporter needs to export a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTrigger {
    pub schema: EntitySchema,
    pub collection_path: CollectionPath,
}

/// Produces export files. The format is the exporter's business.
pub trait Exporter: Send + Sync {
    fn export(&self, trigger: ExportTrigger);
}
