//! Lesson Handlers
//!
//! Listing, creation, deletion and whole-module reordering of lessons.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use lesson_order::{ModuleLessons, ReorderRequest};

use crate::domain::{DomainResult, Lesson};
use crate::repository::{LessonPositioningOperations, Repository};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LessonTitleArgs {
    pub title: String,
}

/// Lessons of a module in display order, with the module's revision
pub async fn list_lessons(
    State(state): State<AppState>,
    Path(module_id): Path<u32>,
) -> DomainResult<Json<ModuleLessons>> {
    state.lessons.list_by_module(module_id).await.map(Json)
}

/// Append a lesson to a module
pub async fn create_lesson(
    State(state): State<AppState>,
    Path(module_id): Path<u32>,
    Json(args): Json<LessonTitleArgs>,
) -> DomainResult<(StatusCode, Json<lesson_order::Lesson>)> {
    let lesson = state.lessons.create(&Lesson::new(module_id, args.title)).await?;
    tracing::info!(module_id, lesson_id = lesson.id, "Lesson created");
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

/// Change a lesson's title; its position is untouched
pub async fn rename_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<u32>,
    Json(args): Json<LessonTitleArgs>,
) -> DomainResult<Json<lesson_order::Lesson>> {
    let edit = Lesson {
        id: lesson_id,
        ..Lesson::new(0, args.title)
    };
    let lesson = state.lessons.update(&edit).await?;
    Ok(Json(lesson.into()))
}

/// Delete a lesson; its siblings are renumbered
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<u32>,
) -> DomainResult<StatusCode> {
    state.lessons.delete(lesson_id).await?;
    tracing::info!(lesson_id, "Lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the full order of a module atomically
pub async fn reorder_lessons(
    State(state): State<AppState>,
    Path(module_id): Path<u32>,
    Json(request): Json<ReorderRequest>,
) -> DomainResult<Json<ModuleLessons>> {
    state.lessons.reorder_lessons(module_id, &request).await.map(Json)
}
