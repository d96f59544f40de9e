//! Contacts schema bootstrap.
//!
//! # Responsibility
//! - Create the `contacts` table when it is absent.
//! - Stamp and check the schema generation in `PRAGMA user_version`.
//!
//! # Invariants
//! - Bootstrap is idempotent; existing rows are never touched.
//! - A file written by a newer binary (higher `user_version`) is refused.
//! - A file that has the table but no stamp (`user_version = 0`) is adopted.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema generation written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const CONTACTS_DDL: &str = "CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    email TEXT,
    address TEXT
);";

/// Creates the contacts table if needed and records the schema stamp.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CONTACTS_DDL)?;
    if current_version < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()?;

    Ok(())
}

/// Returns whether the `contacts` table exists on this connection.
pub fn contacts_table_exists(conn: &Connection) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'contacts'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
