// ==========================================
// gSSURGO Merge - Store Builder
// ==========================================
// Creates a new empty consolidated store from a region schema template:
// six feature tables plus the attribute tables, with the referential
// constraints that pin the tabular import order.
// ==========================================

use std::path::Path;

use tracing::{info, warn};

use crate::domain::types::{FeatureRole, MIN_STORE_TABLES, SSURGO_VERSION};
use crate::error::{ConvertError, ConvertResult};
use crate::repository::GeoStore;
use crate::schema::tables::{self, ColumnDef, ColumnKind, TableDef};
use crate::schema::template::SchemaTemplate;

/// Builds a fresh store from a schema template.
pub struct StoreBuilder {
    template: SchemaTemplate,
}

impl StoreBuilder {
    pub fn new(template: SchemaTemplate) -> StoreBuilder {
        StoreBuilder { template }
    }

    /// Create a new store at `output_path`, replacing any existing one.
    ///
    /// Validates the resulting table count and applies display aliases to
    /// the feature layers when `alias_suffix` is non-empty (alias failures
    /// are logged and ignored).
    pub fn create(&self, output_path: &Path, alias_suffix: &str) -> ConvertResult<GeoStore> {
        delete_existing_store(output_path)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!(
            "creating new store ({}) from template {}",
            output_path.display(),
            self.template.id.name()
        );

        let store = GeoStore::open(output_path).map_err(|e| ConvertError::StoreCreationFailed {
            path: output_path.to_path_buf(),
            message: e.to_string(),
        })?;

        store
            .execute_batch(&self.schema_sql())
            .map_err(|e| ConvertError::StoreCreationFailed {
                path: output_path.to_path_buf(),
                message: e.to_string(),
            })?;

        let table_count = store.table_names()?.len();
        if table_count < MIN_STORE_TABLES {
            return Err(ConvertError::SchemaMismatch {
                table_count,
                expected: MIN_STORE_TABLES,
            });
        }

        if !alias_suffix.is_empty() {
            for role in FeatureRole::ALL {
                let alias = format!("{} - {}", role.label(), alias_suffix);
                if let Err(e) = store.set_layer_alias(role.table_name(), &alias) {
                    warn!("unable to alias {}: {}", role.table_name(), e);
                }
            }
        }

        Ok(store)
    }

    /// Full DDL for this template.
    fn schema_sql(&self) -> String {
        let mut sql = String::new();

        // Bookkeeping tables first: layer aliases and template information.
        sql.push_str(
            "CREATE TABLE layer_alias (\n\
             \x20   tabphyname VARCHAR(30) PRIMARY KEY,\n\
             \x20   alias VARCHAR(120)\n\
             );\n",
        );
        sql.push_str(
            "CREATE TABLE templateinformation (\n\
             \x20   itemname VARCHAR(60) PRIMARY KEY,\n\
             \x20   itemvalue VARCHAR(120)\n\
             );\n",
        );
        sql.push_str(&format!(
            "INSERT INTO templateinformation (itemname, itemvalue) VALUES \
             ('SSURGO Version', '{}.0'),\n ('Template Name', '{}'),\n ('Datum Transform', '{}');\n",
            SSURGO_VERSION,
            self.template.id.name(),
            self.template.datum_transform.unwrap_or("")
        ));

        for role in FeatureRole::ALL {
            sql.push_str(&feature_table_ddl(role));
        }
        for def in tables::ATTRIBUTE_TABLES {
            sql.push_str(&attribute_table_ddl(def));
        }
        sql
    }
}

fn delete_existing_store(path: &Path) -> ConvertResult<()> {
    if path.is_dir() {
        return Err(ConvertError::StoreCreationFailed {
            path: path.to_path_buf(),
            message: "output path is a directory".to_string(),
        });
    }
    if path.exists() {
        info!("removing pre-existing store at {}", path.display());
        std::fs::remove_file(path)?;
    }
    // SQLite sidecar files from an interrupted earlier run.
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = Path::new(&sidecar);
        if sidecar.exists() {
            std::fs::remove_file(sidecar)?;
        }
    }
    Ok(())
}

fn column_sql(col: &ColumnDef) -> String {
    let type_sql = match col.kind {
        ColumnKind::Text if col.length > 0 => format!("VARCHAR({})", col.length),
        ColumnKind::Text => "TEXT".to_string(),
        ColumnKind::Integer => "INTEGER".to_string(),
        ColumnKind::Real => "REAL".to_string(),
        ColumnKind::Date => "DATE".to_string(),
    };
    let unique = if col.unique { " UNIQUE" } else { "" };
    format!("    \"{}\" {}{}", col.name, type_sql, unique)
}

fn attribute_table_ddl(def: &TableDef) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "    \"{}\" INTEGER PRIMARY KEY AUTOINCREMENT",
        tables::IDENTITY_COLUMN
    ));
    for col in def.columns {
        lines.push(column_sql(col));
    }
    for fkdef in def.foreign_keys {
        lines.push(format!(
            "    FOREIGN KEY (\"{}\") REFERENCES \"{}\" (\"{}\")",
            fkdef.column, fkdef.parent_table, fkdef.parent_column
        ));
    }
    format!("CREATE TABLE \"{}\" (\n{}\n);\n", def.name, lines.join(",\n"))
}

fn feature_table_ddl(role: FeatureRole) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "    \"{}\" INTEGER PRIMARY KEY AUTOINCREMENT",
        tables::IDENTITY_COLUMN
    ));
    // Geometry as WKT plus the bbox columns backing the spatial index.
    lines.push("    shape TEXT".to_string());
    for bbox_col in ["xmin", "ymin", "xmax", "ymax"] {
        lines.push(format!("    {bbox_col} REAL"));
    }
    for col in tables::feature_attribute_columns(role) {
        lines.push(column_sql(col));
    }
    format!(
        "CREATE TABLE \"{}\" (\n{}\n);\n",
        role.table_name(),
        lines.join(",\n")
    )
}
