//! Lesson Positioning Operations
//!
//! Operations for managing lesson order within a module. Every write that
//! changes a module's order also bumps its `order_revision`, which is how
//! concurrent reorders are detected.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use lesson_order::{validate_order, ModuleId, ModuleLessons, OrderEntry, ReorderRequest};

use crate::domain::{DomainError, DomainResult, Lesson};
use super::lesson_repo::row_to_lesson;

/// Trait for lesson positioning operations
#[async_trait]
pub trait LessonPositioningOperations {
    /// The module's lessons in display order, with its current revision
    async fn list_by_module(&self, module_id: u32) -> DomainResult<ModuleLessons>;

    /// Replace the module's whole order in one transaction
    async fn reorder_lessons(&self, module_id: u32, request: &ReorderRequest) -> DomainResult<ModuleLessons>;
}

#[async_trait]
impl LessonPositioningOperations for super::lesson_repo::LessonRepository {
    async fn list_by_module(&self, module_id: u32) -> DomainResult<ModuleLessons> {
        let conn = self.conn.lock().await;
        module_lessons_in(&conn, module_id)
    }

    async fn reorder_lessons(&self, module_id: u32, request: &ReorderRequest) -> DomainResult<ModuleLessons> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let revision = revision_in(&tx, module_id)?;
        if let Some(base) = request.base_revision {
            if base != revision {
                warn!(module_id, base, revision, "Rejecting reorder based on a stale revision");
                return Err(DomainError::Conflict(format!(
                    "Module {} is at revision {}, request was based on {}",
                    module_id, revision, base
                )));
            }
        }

        let current: Vec<lesson_order::Lesson> = lessons_in(&tx, module_id)?
            .into_iter()
            .map(Into::into)
            .collect();
        if let Err(e) = validate_order(ModuleId(module_id), &current, &request.order) {
            if let Some((lesson_id, owner)) = foreign_entry_in(&tx, module_id, &request.order)? {
                return Err(DomainError::InvalidInput(format!(
                    "Lesson {} belongs to module {}, not {}",
                    lesson_id, owner, module_id
                )));
            }
            return Err(e.into());
        }

        let mut order = request.order.clone();
        order.sort_by_key(|entry| entry.display_order);
        let now = chrono::Utc::now().timestamp_millis();
        for (index, entry) in order.iter().enumerate() {
            tx.execute(
                "UPDATE lessons SET display_order = ?1, updated_at = ?2 WHERE id = ?3 AND module_id = ?4",
                params![index as u32 + 1, now, entry.id.0, module_id],
            )?;
        }
        bump_revision_in(&tx, module_id)?;
        let stored = module_lessons_in(&tx, module_id)?;
        tx.commit()?;

        info!(module_id, revision = stored.revision, lessons = stored.lessons.len(), "Lessons reordered");
        Ok(stored)
    }
}

// ========================
// Connection-level helpers (callers hold the lock / transaction)
// ========================

/// Current order revision; NotFound if the module does not exist
pub(super) fn revision_in(conn: &Connection, module_id: u32) -> DomainResult<u64> {
    conn.query_row(
        "SELECT order_revision FROM modules WHERE id = ?1",
        params![module_id],
        |row| row.get::<_, i64>(0),
    )
    .optional()?
    .map(|revision| revision as u64)
    .ok_or_else(|| DomainError::NotFound(format!("Module {}", module_id)))
}

pub(super) fn bump_revision_in(conn: &Connection, module_id: u32) -> DomainResult<()> {
    conn.execute(
        "UPDATE modules SET order_revision = order_revision + 1 WHERE id = ?1",
        params![module_id],
    )?;
    Ok(())
}

pub(super) fn lessons_in(conn: &Connection, module_id: u32) -> DomainResult<Vec<Lesson>> {
    let mut stmt = conn.prepare(
        "SELECT id, module_id, title, display_order, created_at, updated_at
         FROM lessons WHERE module_id = ?1 ORDER BY display_order, id",
    )?;
    let rows = stmt.query_map(params![module_id], row_to_lesson)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DomainError::from)
}

pub(super) fn module_lessons_in(conn: &Connection, module_id: u32) -> DomainResult<ModuleLessons> {
    let revision = revision_in(conn, module_id)?;
    let lessons = lessons_in(conn, module_id)?;
    Ok(ModuleLessons {
        module_id: ModuleId(module_id),
        revision,
        lessons: lessons.into_iter().map(Into::into).collect(),
    })
}

pub(super) fn next_display_order_in(conn: &Connection, module_id: u32) -> DomainResult<u32> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(display_order), 0) + 1 FROM lessons WHERE module_id = ?1",
        params![module_id],
        |row| row.get::<_, u32>(0),
    )?;
    Ok(next)
}

pub(super) fn reindex_in(conn: &Connection, module_id: u32) -> DomainResult<()> {
    let ids: Vec<u32> = lessons_in(conn, module_id)?
        .into_iter()
        .map(|lesson| lesson.id)
        .collect();

    // Update each lesson with sequential order
    let now = chrono::Utc::now().timestamp_millis();
    for (index, id) in ids.iter().enumerate() {
        conn.execute(
            "UPDATE lessons SET display_order = ?1, updated_at = ?2 WHERE id = ?3",
            params![index as u32 + 1, now, *id],
        )?;
    }
    Ok(())
}

/// First submitted id that exists but belongs to another module
fn foreign_entry_in(conn: &Connection, module_id: u32, order: &[OrderEntry]) -> DomainResult<Option<(u32, u32)>> {
    for entry in order {
        let owner = conn
            .query_row(
                "SELECT module_id FROM lessons WHERE id = ?1",
                params![entry.id.0],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        if let Some(owner) = owner {
            if owner != module_id {
                return Ok(Some((entry.id.0, owner)));
            }
        }
    }
    Ok(None)
}
