// ==========================================
// gSSURGO Merge - Store Schema Layer
// ==========================================

pub mod builder;
pub mod catalog;
pub mod tables;
pub mod template;

pub use builder::StoreBuilder;
pub use catalog::{FieldDef, LiveCatalog, SchemaCatalog, SchemaEntry, StaticCatalog};
pub use template::{SchemaTemplate, TemplateId};
