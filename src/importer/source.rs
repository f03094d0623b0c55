// ==========================================
// gSSURGO Merge - Tabular Source Resolution
// ==========================================
// A survey unit's tabular data comes either from pipe-delimited text files
// or from a populated template database. Both paths resolve here; the
// importer streams rows without caring which kind it got.
// ==========================================

use std::fs::File;
use std::path::Path;

use rusqlite::Connection;
use tracing::warn;

use crate::db;
use crate::domain::value::CellValue;
use crate::error::{ConvertError, ConvertResult};
use crate::schema::tables::IDENTITY_COLUMN;

/// Which kind of tabular source the run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularMode {
    /// Pipe-delimited `.txt` files in the tabular folder.
    TextFiles,
    /// Populated `soil_d_<areasymbol>.sqlite` template database.
    TemplateDatabase,
}

/// Open a pipe-delimited SSURGO text file.
///
/// No header row; quote character `"`; rows may legitimately differ in
/// width for the anomalous tables, so length checks happen downstream.
pub fn open_pipe_reader(path: &Path) -> ConvertResult<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

/// Schema version from the tabular folder's `version.txt` marker, major
/// digit only. A missing marker is reported as version 0 so the caller's
/// version check fails loudly rather than guessing.
pub fn version_from_text(tabular_folder: &Path) -> ConvertResult<i32> {
    let marker = tabular_folder.join("version.txt");
    if !marker.is_file() {
        warn!("unable to find tabular file: version.txt");
        return Ok(0);
    }
    let content = std::fs::read_to_string(&marker)?;
    let first_line = content.lines().next().unwrap_or("");
    let major = first_line
        .split('.')
        .next()
        .unwrap_or("")
        .trim()
        .parse::<i32>()
        .unwrap_or(0);
    Ok(major)
}

/// Open a template database read-only.
pub fn open_template_db(path: &Path) -> ConvertResult<Connection> {
    if !path.is_file() {
        return Err(ConvertError::MissingSource {
            table: "templateinformation".to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(db::open_source_connection(path)?)
}

/// Schema version from a template database's information table.
pub fn version_from_db(conn: &Connection, source: &str) -> ConvertResult<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT itemvalue FROM templateinformation WHERE itemname = 'SSURGO Version'",
            [],
            |row| row.get(0),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })
        .map_err(|_| {
            ConvertError::Internal(format!(
                "unable to open template database information in {source}"
            ))
        })?;

    let major = value
        .as_deref()
        .and_then(|v| v.split('.').next())
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(0);
    Ok(major)
}

/// Area symbol recorded in a template database's survey catalog, if any.
/// With multiple catalog rows the last one wins, mirroring how the legacy
/// importer scanned the table.
pub fn db_catalog_symbol(conn: &Connection) -> ConvertResult<Option<String>> {
    let mut stmt = match conn.prepare("SELECT areasymbol FROM sacatalog") {
        Ok(stmt) => stmt,
        Err(_) => return Ok(None),
    };
    let mut symbol = None;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    for row in rows {
        symbol = Some(row?);
    }
    Ok(symbol)
}

/// Whether the source database has a table.
pub fn db_has_table(conn: &Connection, table: &str) -> ConvertResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Column names of a source database table, identity column excluded.
pub fn db_table_columns(conn: &Connection, table: &str) -> ConvertResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\")"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|name| name != IDENTITY_COLUMN)
        .collect();
    Ok(columns)
}

/// Read all rows of a source database table in column order.
pub fn db_read_rows(
    conn: &Connection,
    table: &str,
    columns: &[String],
) -> ConvertResult<Vec<Vec<CellValue>>> {
    let column_list = columns
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn.prepare(&format!("SELECT {column_list} FROM \"{table}\""))?;
    let rows = stmt
        .query_map([], |row| {
            let mut cells = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                let value: rusqlite::types::Value = row.get(i)?;
                cells.push(CellValue::from(value));
            }
            Ok(cells)
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
