//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;
    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: conversion factor table
///
/// `IF NOT EXISTS` keeps files written by the legacy spreadsheet loader usable;
/// their table has the same name and column names.
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS CONVERSION_FACTOR (
            "Unit_input" TEXT NOT NULL,          -- e.g. "ml"
            "Unit_output" TEXT NOT NULL,         -- e.g. "l"
            "Conversion_ratio" REAL NOT NULL     -- 1 Unit_input = ratio Unit_output
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
///
/// Requires the `schema_migrations` table created by [`run_migrations`].
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_version_errors_without_migrations_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(get_schema_version(&conn).is_err());
    }

    #[test]
    fn test_legacy_table_is_kept() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"CREATE TABLE CONVERSION_FACTOR ("Unit_input" TEXT, "Unit_output" TEXT, "Conversion_ratio" REAL);
               INSERT INTO CONVERSION_FACTOR VALUES ('ml', 'l', 0.001);"#,
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM CONVERSION_FACTOR", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
