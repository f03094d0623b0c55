// ==========================================
// gSSURGO Merge - Domain Layer
// ==========================================

pub mod survey;
pub mod types;
pub mod value;

pub use survey::{discover_units, SurveyUnit};
pub use types::{FeatureRole, Region, MIN_STORE_TABLES, SSURGO_VERSION};
pub use value::{CellValue, KeyValue};
