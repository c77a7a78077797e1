//! Schema definition and connection pragmas.

use rusqlite::Connection;
use std::time::Duration;

/// Tables and index for the picnic store. Every statement is idempotent.
///
/// Foreign keys are declared here but only enforced when the connection has
/// `PRAGMA foreign_keys = ON`. No reference cascades.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name        TEXT UNIQUE NOT NULL,
    created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS index_users_on_name ON users (name);

CREATE TABLE IF NOT EXISTS picnics (
    id          INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name        TEXT NOT NULL,
    location    TEXT NOT NULL,
    date        TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS users_picnics (
    id         INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    user_id    INTEGER,
    picnic_id  INTEGER,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (picnic_id) REFERENCES picnics(id)
);

CREATE TABLE IF NOT EXISTS food_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name        TEXT NOT NULL,
    measure     TEXT NOT NULL,
    url         TEXT NOT NULL,
    created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS contributions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    user_id       INTEGER,
    picnic_id     INTEGER,
    food_item_id  INTEGER,
    quantity      INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (picnic_id) REFERENCES picnics(id),
    FOREIGN KEY (food_item_id) REFERENCES food_items(id)
);
"#;

/// Create all tables and the user name index if they do not exist.
///
/// Safe to run on every startup.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Apply per-connection pragmas.
///
/// WAL lets readers run alongside the single writer. In-memory databases
/// report `memory` for the journal mode and keep it.
pub fn apply_pragmas(
    conn: &Connection,
    enforce_foreign_keys: bool,
    busy_timeout: Duration,
) -> rusqlite::Result<()> {
    // Set first: switching to WAL needs a lock other pool connections may hold.
    conn.busy_timeout(busy_timeout)?;

    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    tracing::trace!(journal_mode = %mode, "Applied journal mode");

    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", enforce_foreign_keys)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        assert_eq!(
            table_names(&conn),
            vec!["contributions", "food_items", "picnics", "users", "users_picnics"]
        );

        let index_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'index' AND name = 'index_users_on_name'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO users (name) VALUES ('Ann')", [])
            .unwrap();

        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "re-running the schema must keep existing rows");
    }

    #[test]
    fn test_apply_pragmas_sets_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn, true, Duration::from_millis(100)).unwrap();

        let enabled: bool = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(enabled);
    }

    #[test]
    fn test_apply_pragmas_clears_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        apply_pragmas(&conn, false, Duration::from_millis(100)).unwrap();

        let enabled: bool = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(!enabled);
    }

    #[test]
    fn test_timestamps_default_on_insert() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO users (name) VALUES ('Ann')", [])
            .unwrap();

        let created_at: String = conn
            .query_row("SELECT created_at FROM users", [], |row| row.get(0))
            .unwrap();
        assert!(!created_at.is_empty());
    }
}
