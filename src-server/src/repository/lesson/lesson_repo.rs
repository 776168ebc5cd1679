//! Lesson Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Lesson CRUD operations.
//! Ordering operations are in lesson_positioning.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, Lesson};
use super::super::db::DbConn;
use super::super::traits::Repository;
use super::lesson_positioning::{bump_revision_in, next_display_order_in, reindex_in, revision_in};

/// SQLite implementation of Lesson repository
pub struct LessonRepository {
    pub(super) conn: DbConn,
}

impl LessonRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Lesson> for LessonRepository {
    /// Append to the end of the module's order
    async fn create(&self, entity: &Lesson) -> DomainResult<Lesson> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Lesson title is empty".to_string()));
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        revision_in(&tx, entity.module_id)?;

        let display_order = next_display_order_in(&tx, entity.module_id)?;
        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "INSERT INTO lessons (module_id, title, display_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![entity.module_id, title, display_order, now],
        )?;
        let id = tx.last_insert_rowid() as u32;
        bump_revision_in(&tx, entity.module_id)?;
        tx.commit()?;

        Ok(Lesson {
            id,
            module_id: entity.module_id,
            title: title.to_string(),
            display_order,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    /// Title only; order changes go through reorder_lessons
    async fn update(&self, entity: &Lesson) -> DomainResult<Lesson> {
        let title = entity.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Lesson title is empty".to_string()));
        }
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "UPDATE lessons SET title = ?1, updated_at = ?2 WHERE id = ?3",
            params![title, now, entity.id],
        )?;
        conn.query_row(
            "SELECT id, module_id, title, display_order, created_at, updated_at FROM lessons WHERE id = ?1",
            params![entity.id],
            row_to_lesson,
        )
        .optional()?
        .ok_or_else(|| DomainError::NotFound(format!("Lesson {}", entity.id)))
    }

    /// Remove and close the gap in the module's order
    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let module_id = tx
            .query_row(
                "SELECT module_id FROM lessons WHERE id = ?1",
                params![id],
                |row| row.get::<_, u32>(0),
            )
            .optional()?
            .ok_or_else(|| DomainError::NotFound(format!("Lesson {}", id)))?;

        tx.execute("DELETE FROM lessons WHERE id = ?1", params![id])?;
        reindex_in(&tx, module_id)?;
        bump_revision_in(&tx, module_id)?;
        tx.commit()?;
        Ok(())
    }
}

/// Convert a database row to Lesson
pub(super) fn row_to_lesson(row: &rusqlite::Row) -> rusqlite::Result<Lesson> {
    Ok(Lesson {
        id: row.get(0)?,
        module_id: row.get(1)?,
        title: row.get(2)?,
        display_order: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
