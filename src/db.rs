// ==========================================
// gSSURGO Merge - SQLite Connection Setup
// ==========================================
// Goals:
// - One place for Connection::open PRAGMA behavior, so foreign keys are
//   never enabled in some modules and forgotten in others
// - Uniform busy_timeout so writes queued behind another handle wait
//   instead of failing
// ==========================================

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

/// Default busy_timeout (milliseconds).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the uniform PRAGMAs to a store connection.
///
/// foreign_keys and busy_timeout are per-connection settings and must be
/// re-applied on every open.
pub fn configure_store_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a store connection with the uniform configuration applied.
pub fn open_store_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    configure_store_connection(&conn)?;
    Ok(conn)
}

/// Open a survey unit's template database read-only.
///
/// Source databases are never written; opening read-only keeps a buggy
/// import path from corrupting the input dataset.
pub fn open_source_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(conn)
}
