// ==========================================
// gSSURGO Merge - Core Library
// ==========================================
// Merges per-county SSURGO soil survey exports (shapefiles + tabular
// text/database exports) into one consolidated geospatial store with a
// fixed relational schema, referential integrity, lookup deduplication,
// and a deterministic spatial merge order.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - survey units, regions, cell values
pub mod domain;

// Store access layer
pub mod repository;

// Schema layer - templates, catalog, store builder
pub mod schema;

// Spatial layer - shapefiles, sort order, feature merge
pub mod spatial;

// Tabular import layer
pub mod importer;

// Engine layer - run orchestration
pub mod engine;

// Run options
pub mod config;

// Store connection infrastructure (uniform PRAGMAs)
pub mod db;

// Logging setup
pub mod logging;

// Error taxonomy
pub mod error;

// ==========================================
// Core re-exports
// ==========================================

pub use config::ConversionOptions;
pub use domain::{CellValue, FeatureRole, KeyValue, Region, SurveyUnit};
pub use engine::{ConversionOrchestrator, ConversionResult};
pub use error::{ConvertError, ConvertResult};
pub use importer::{ImportSession, TabularImporter, TabularMode, UniqueKeyFilter};
pub use repository::GeoStore;
pub use schema::{LiveCatalog, SchemaCatalog, SchemaTemplate, StaticCatalog, StoreBuilder};
pub use spatial::{FeatureMerger, MergePlan};

// ==========================================
// Constants
// ==========================================

// Tool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Tool name
pub const APP_NAME: &str = "gSSURGO Merge";
