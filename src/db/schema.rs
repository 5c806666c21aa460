// Database schema — table creation.
//
// A `schema_version` table tracks which migrations have run so future
// schema changes can be applied incrementally.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Raw transaction history, imported from CSV. The engine never
        -- mutates these rows; matrices are rebuilt from them per request.
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            merchant TEXT NOT NULL,
            amount REAL NOT NULL,              -- signed spend (refunds negative)
            date TEXT NOT NULL,                -- YYYY-MM-DD
            category TEXT NOT NULL,
            city TEXT NOT NULL,
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for per-user lookups (summary, spend rows)
        CREATE INDEX IF NOT EXISTS idx_transactions_user
            ON transactions(user_id);

        -- Index for per-merchant counts
        CREATE INDEX IF NOT EXISTS idx_transactions_merchant
            ON transactions(merchant);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, transactions = 2 tables
        assert_eq!(count, 2i64);
    }
}
