//! Module Repository
//!
//! SQLite-backed implementation for Module CRUD operations.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Module, ModuleSummary};
use super::db::DbConn;
use super::traits::Repository;

/// SQLite implementation of Module repository
pub struct ModuleRepository {
    conn: DbConn,
}

impl ModuleRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// All modules with their lesson counts, oldest first
    pub async fn list_summaries(&self) -> DomainResult<Vec<ModuleSummary>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT m.id, m.title, COUNT(l.id)
             FROM modules m LEFT JOIN lessons l ON l.module_id = m.id
             GROUP BY m.id ORDER BY m.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ModuleSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                lesson_count: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DomainError::from)
    }
}

#[async_trait]
impl Repository<Module> for ModuleRepository {
    async fn create(&self, entity: &Module) -> DomainResult<Module> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Module title is empty".to_string()));
        }
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO modules (title, order_revision, created_at) VALUES (?1, 1, ?2)",
            params![title, now],
        )?;
        Ok(Module {
            id: conn.last_insert_rowid() as u32,
            title: title.to_string(),
            order_revision: 1,
            created_at: Some(now),
        })
    }

    /// Title only; the revision belongs to the lesson order
    async fn update(&self, entity: &Module) -> DomainResult<Module> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Module title is empty".to_string()));
        }
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE modules SET title = ?1 WHERE id = ?2",
            params![title, entity.id],
        )?;
        conn.query_row(
            "SELECT id, title, order_revision, created_at FROM modules WHERE id = ?1",
            params![entity.id],
            row_to_module,
        )
        .optional()?
        .ok_or_else(|| DomainError::NotFound(format!("Module {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        // Manual cascade: lessons first
        tx.execute("DELETE FROM lessons WHERE module_id = ?1", params![id])?;
        let removed = tx.execute("DELETE FROM modules WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("Module {}", id)));
        }
        tx.commit()?;
        Ok(())
    }
}

/// Convert a database row to Module
fn row_to_module(row: &rusqlite::Row) -> rusqlite::Result<Module> {
    Ok(Module {
        id: row.get(0)?,
        title: row.get(1)?,
        order_revision: row.get::<_, i64>(2)? as u64,
        created_at: row.get(3)?,
    })
}
