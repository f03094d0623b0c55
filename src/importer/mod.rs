// ==========================================
// gSSURGO Merge - Tabular Import Layer
// ==========================================
// Responsibility: ordered multi-table tabular import with foreign-key-safe
// sequencing, primary-key deduplication, and the row-level transforms for
// anomalous tables.
// ==========================================

pub mod codec;
pub mod key_filter;
pub mod session;
pub mod source;
pub mod tabular;

pub use key_filter::UniqueKeyFilter;
pub use session::ImportSession;
pub use source::TabularMode;
pub use tabular::TabularImporter;
