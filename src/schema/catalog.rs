// ==========================================
// gSSURGO Merge - Schema Catalog
// ==========================================
// Lookup surface over the store's table metadata: source-file name to
// table, table to ordered field list, table to primary key. One
// implementation reads the live store (mdstattabs plus the physical
// column info); one is backed by the static template data so importer
// logic can be unit-tested without a store.
// ==========================================

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::types::FeatureRole;
use crate::error::{ConvertError, ConvertResult};
use crate::repository::GeoStore;
use crate::schema::tables::{self, ColumnKind, IDENTITY_COLUMN};

/// Maps a delimited source file to its target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub source_file: String,
    pub table: String,
    pub label: String,
}

/// One field of a target table, with the declared length used for
/// truncation (string fields only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub length: Option<u16>,
}

/// Read-only schema lookups used throughout the tabular import.
pub trait SchemaCatalog {
    /// Resolve a source-file name to its registered table, if any.
    fn entry_for_source(&self, source_file: &str) -> ConvertResult<Option<SchemaEntry>>;

    /// Ordered field list of a table, excluding the identity column.
    fn fields(&self, table: &str) -> ConvertResult<Vec<FieldDef>>;

    /// Logical primary-key column of a table.
    fn primary_key(&self, table: &str) -> Option<String>;

    /// Attribute tables that take per-survey imports (static metadata and
    /// feature tables excluded).
    fn import_tables(&self) -> ConvertResult<Vec<String>>;
}

fn is_feature_table(name: &str) -> bool {
    FeatureRole::ALL.iter().any(|r| r.table_name() == name)
}

/// Parse the declared length out of a `VARCHAR(n)` column type.
pub(crate) fn declared_length(type_name: &str) -> Option<u16> {
    let upper = type_name.to_uppercase();
    let rest = upper.strip_prefix("VARCHAR(")?;
    let digits = rest.strip_suffix(')')?;
    digits.parse().ok()
}

/// Ordered field list of a physical table, identity column excluded,
/// lengths taken from the declared column types.
pub(crate) fn physical_fields(store: &GeoStore, table: &str) -> ConvertResult<Vec<FieldDef>> {
    let fields: Vec<FieldDef> = store
        .table_columns(table)?
        .into_iter()
        .filter(|(name, _)| name != IDENTITY_COLUMN)
        .map(|(name, type_name)| FieldDef {
            length: declared_length(&type_name),
            name,
        })
        .collect();
    if fields.is_empty() {
        return Err(ConvertError::Internal(format!(
            "failed to get field names for {table}"
        )));
    }
    Ok(fields)
}

// ==========================================
// Live catalog, backed by the output store
// ==========================================

/// Catalog reading the store's own metadata tables. Build it after the
/// metadata pre-pass has populated `mdstattabs`.
pub struct LiveCatalog<'a> {
    store: &'a GeoStore,
    /// iefilename -> (tabphyname, tablabel), first registration wins.
    info: HashMap<String, (String, String)>,
    field_cache: RefCell<HashMap<String, Vec<FieldDef>>>,
}

impl<'a> LiveCatalog<'a> {
    pub fn load(store: &'a GeoStore) -> ConvertResult<LiveCatalog<'a>> {
        let info = store.table_info()?;
        Ok(LiveCatalog {
            store,
            info,
            field_cache: RefCell::new(HashMap::new()),
        })
    }
}

impl SchemaCatalog for LiveCatalog<'_> {
    fn entry_for_source(&self, source_file: &str) -> ConvertResult<Option<SchemaEntry>> {
        Ok(self.info.get(source_file).map(|(table, label)| SchemaEntry {
            source_file: source_file.to_string(),
            table: table.clone(),
            label: label.clone(),
        }))
    }

    fn fields(&self, table: &str) -> ConvertResult<Vec<FieldDef>> {
        if let Some(cached) = self.field_cache.borrow().get(table) {
            return Ok(cached.clone());
        }
        let fields = physical_fields(self.store, table)?;
        self.field_cache
            .borrow_mut()
            .insert(table.to_string(), fields.clone());
        Ok(fields)
    }

    fn primary_key(&self, table: &str) -> Option<String> {
        tables::attribute_table(table).map(|def| def.primary_key.to_string())
    }

    fn import_tables(&self) -> ConvertResult<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        let mut stmt = self
            .store
            .conn()
            .prepare("SELECT tabphyname FROM mdstattabs ORDER BY tabphyname")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for row in rows {
            let name = row?;
            if !name.starts_with("mdstat") && !is_feature_table(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

// ==========================================
// Static catalog, backed by the template data
// ==========================================

/// Catalog over the embedded schema template; no store required.
pub struct StaticCatalog;

impl SchemaCatalog for StaticCatalog {
    fn entry_for_source(&self, source_file: &str) -> ConvertResult<Option<SchemaEntry>> {
        Ok(tables::table_by_source(source_file).map(|def| SchemaEntry {
            source_file: source_file.to_string(),
            table: def.name.to_string(),
            label: def.label.to_string(),
        }))
    }

    fn fields(&self, table: &str) -> ConvertResult<Vec<FieldDef>> {
        let def = tables::attribute_table(table).ok_or_else(|| {
            ConvertError::Internal(format!("failed to get field names for {table}"))
        })?;
        Ok(def
            .columns
            .iter()
            .map(|col| FieldDef {
                name: col.name.to_string(),
                length: match col.kind {
                    ColumnKind::Text if col.length > 0 => Some(col.length),
                    _ => None,
                },
            })
            .collect())
    }

    fn primary_key(&self, table: &str) -> Option<String> {
        tables::attribute_table(table).map(|def| def.primary_key.to_string())
    }

    fn import_tables(&self) -> ConvertResult<Vec<String>> {
        Ok(tables::ATTRIBUTE_TABLES
            .iter()
            .filter(|def| !def.name.starts_with("mdstat"))
            .map(|def| def.name.to_string())
            .collect())
    }
}
