// ==========================================
// gSSURGO Merge - Conversion Error Types
// ==========================================
// Tool: thiserror derive macros
// ==========================================

use std::path::PathBuf;

use thiserror::Error;

/// Error taxonomy for a conversion run.
///
/// Every variant below the ambient wrappers is fatal to the run: there is no
/// partial-success mode, and no automatic cleanup of a partially-built store.
#[derive(Error, Debug)]
pub enum ConvertError {
    // ===== Spatial errors =====
    #[error("corrupt or empty soil polygon shapefile for {area_symbol}: {message}")]
    CorruptGeometry {
        area_symbol: String,
        message: String,
    },

    #[error("{role} imported only {actual} features, should be {expected}")]
    FeatureCountMismatch {
        role: &'static str,
        expected: i64,
        actual: i64,
    },

    // ===== Store creation errors =====
    #[error("failed to create output store at {path}: {message}")]
    StoreCreationFailed { path: PathBuf, message: String },

    #[error("output store has only {table_count} tables, expected at least {expected}")]
    SchemaMismatch {
        table_count: usize,
        expected: usize,
    },

    // ===== Tabular import errors =====
    #[error("tabular data in {dataset} (SSURGO version {found}) is not supported, expected version {expected}")]
    UnsupportedVersion {
        dataset: String,
        found: i32,
        expected: i32,
    },

    #[error("survey data in {dataset} reports area symbol '{found}', does not match filename symbol '{expected}'")]
    AreaSymbolMismatch {
        dataset: String,
        found: String,
        expected: String,
    },

    #[error("survey catalog table not found or empty in {dataset}")]
    MissingCatalog { dataset: String },

    #[error("missing tabular source for table '{table}' ({path})")]
    MissingSource { table: String, path: PathBuf },

    #[error("error writing line {line} of {path} into table '{table}': {message}")]
    RowInsertFailed {
        table: String,
        line: usize,
        path: String,
        message: String,
    },

    #[error("table '{table}' has only {rows} records, sanity floor is {floor}")]
    UndersizedTable {
        table: String,
        rows: usize,
        floor: usize,
    },

    #[error("tabular import for {area_symbol} left no survey catalog record")]
    ImportUnverified { area_symbol: String },

    // ===== Ambient wrappers =====
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("record parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConvertError {
    /// Build a `RowInsertFailed` with the offending line and source path.
    pub fn row_insert(
        table: impl Into<String>,
        line: usize,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConvertError::RowInsertFailed {
            table: table.into(),
            line,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
