//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared connection handle used by every repository
pub type DbConn = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path` and run migrations.
/// `":memory:"` gives a private in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbConn> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", db_path.display(), e)))?;

    run_migrations(&conn)?;
    tracing::info!("Database ready at {}", db_path.display());

    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS modules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            created_at INTEGER
        );
        CREATE TABLE IF NOT EXISTS lessons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            module_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            display_order INTEGER NOT NULL,
            created_at INTEGER,
            updated_at INTEGER
        );",
    )?;

    // Databases created before conflict detection lack the revision column
    if !column_exists(conn, "modules", "order_revision")? {
        conn.execute(
            "ALTER TABLE modules ADD COLUMN order_revision INTEGER NOT NULL DEFAULT 1",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add order_revision: {}", e)))?;
    }

    // Create index for faster per-module ordered reads
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_lessons_module ON lessons(module_id, display_order)",
        [],
    )?;

    Ok(())
}
