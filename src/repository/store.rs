// ==========================================
// gSSURGO Merge - Consolidated Store Repository
// ==========================================
// Thin wrapper over the SQLite store. The rest of the pipeline treats the
// store as opaque: create table, insert row, count rows, query rows,
// build index. All SQL lives here.
// ==========================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::db;
use crate::domain::value::CellValue;
use crate::error::{ConvertError, ConvertResult};

/// Handle on the consolidated output store.
pub struct GeoStore {
    conn: Connection,
    path: PathBuf,
}

impl GeoStore {
    /// Open an existing store.
    pub fn open(path: &Path) -> ConvertResult<GeoStore> {
        let conn = db::open_store_connection(path)?;
        Ok(GeoStore {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute raw DDL (store creation only).
    pub fn execute_batch(&self, sql: &str) -> ConvertResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Names of all user tables in the store.
    pub fn table_names(&self) -> ConvertResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn has_table(&self, table: &str) -> ConvertResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Ordered column names and declared types of a table.
    pub fn table_columns(&self, table: &str) -> ConvertResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
        let cols = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        if cols.is_empty() {
            return Err(ConvertError::Internal(format!(
                "failed to get field names for {table}"
            )));
        }
        Ok(cols)
    }

    pub fn count_rows(&self, table: &str) -> ConvertResult<i64> {
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// Insert one row. `fields` and `values` run in parallel; the statement
    /// is cached, so per-row cost is binding only.
    pub fn insert_row(
        &self,
        table: &str,
        fields: &[String],
        values: &[CellValue],
    ) -> rusqlite::Result<()> {
        debug_assert_eq!(fields.len(), values.len());
        let column_list = fields
            .iter()
            .map(|f| format!("\"{f}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=fields.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("INSERT INTO \"{table}\" ({column_list}) VALUES ({placeholders})");
        let mut stmt = self.conn.prepare_cached(&sql)?;
        stmt.execute(rusqlite::params_from_iter(values.iter()))?;
        Ok(())
    }

    /// Attribute index, tolerating an already-existing index.
    pub fn create_index(&self, table: &str, column: &str, index_name: &str) -> ConvertResult<()> {
        debug!("creating index {} on {}({})", index_name, table, column);
        self.conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS \"{index_name}\" ON \"{table}\" (\"{column}\")"
        ))?;
        Ok(())
    }

    /// Spatial index over the feature bbox columns, tolerating an
    /// already-existing index.
    pub fn create_spatial_index(&self, table: &str) -> ConvertResult<()> {
        debug!("creating spatial index on {}", table);
        self.conn.execute_batch(&format!(
            "CREATE INDEX IF NOT EXISTS \"Sidx_{table}\" ON \"{table}\" (xmin, xmax, ymin, ymax)"
        ))?;
        Ok(())
    }

    /// Whether an index with this name exists.
    pub fn has_index(&self, index_name: &str) -> ConvertResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1",
            [index_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Whether any row of `table` has a non-null value in `column`.
    pub fn has_non_null(&self, table: &str, column: &str) -> ConvertResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                &format!("SELECT 1 FROM \"{table}\" WHERE \"{column}\" IS NOT NULL LIMIT 1"),
                [],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(found.is_some())
    }

    /// Delete rows where `column` equals `value`; returns the number removed.
    pub fn delete_where_equals(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> ConvertResult<usize> {
        let removed = self.conn.execute(
            &format!("DELETE FROM \"{table}\" WHERE \"{column}\" = ?1"),
            [value],
        )?;
        Ok(removed)
    }

    /// Set a human-readable display alias on a feature layer.
    pub fn set_layer_alias(&self, table: &str, alias: &str) -> ConvertResult<()> {
        self.conn.execute(
            "INSERT INTO layer_alias (tabphyname, alias) VALUES (?1, ?2) \
             ON CONFLICT(tabphyname) DO UPDATE SET alias = excluded.alias",
            [table, alias],
        )?;
        Ok(())
    }

    /// Survey catalog rows as (areasymbol, saverest) pairs for one symbol,
    /// or all rows when `area_symbol` is None.
    pub fn catalog_entries(
        &self,
        area_symbol: Option<&str>,
    ) -> ConvertResult<Vec<(String, Option<String>)>> {
        let (sql, params): (&str, Vec<String>) = match area_symbol {
            Some(symbol) => (
                "SELECT areasymbol, saverest FROM sacatalog \
                 WHERE UPPER(areasymbol) = ?1 ORDER BY areasymbol",
                vec![symbol.to_uppercase()],
            ),
            None => (
                "SELECT areasymbol, saverest FROM sacatalog ORDER BY areasymbol",
                Vec::new(),
            ),
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Map of source-file name to (physical table, label) from the store's
    /// own metadata table. First registration of a source file wins.
    pub fn table_info(&self) -> ConvertResult<HashMap<String, (String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT iefilename, tabphyname, tablabel FROM mdstattabs")?;
        let mut info = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;
        for row in rows {
            let (iefilename, tabphyname, tablabel) = row?;
            let Some(iefilename) = iefilename else {
                continue;
            };
            info.entry(iefilename)
                .or_insert((tabphyname, tablabel.unwrap_or_default()));
        }
        Ok(info)
    }
}
