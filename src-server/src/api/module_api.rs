//! Module Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::{DomainResult, Module, ModuleSummary};
use crate::repository::Repository;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ModuleTitleArgs {
    pub title: String,
}

/// List modules with lesson counts
pub async fn list_modules(State(state): State<AppState>) -> DomainResult<Json<Vec<ModuleSummary>>> {
    state.modules.list_summaries().await.map(Json)
}

/// Create a new module
pub async fn create_module(
    State(state): State<AppState>,
    Json(args): Json<ModuleTitleArgs>,
) -> DomainResult<(StatusCode, Json<Module>)> {
    let module = state.modules.create(&Module::new(args.title)).await?;
    tracing::info!(module_id = module.id, "Module created");
    Ok((StatusCode::CREATED, Json(module)))
}

pub async fn rename_module(
    State(state): State<AppState>,
    Path(module_id): Path<u32>,
    Json(args): Json<ModuleTitleArgs>,
) -> DomainResult<Json<Module>> {
    let edit = Module {
        id: module_id,
        ..Module::new(args.title)
    };
    state.modules.update(&edit).await.map(Json)
}

/// Delete a module together with its lessons
pub async fn delete_module(
    State(state): State<AppState>,
    Path(module_id): Path<u32>,
) -> DomainResult<StatusCode> {
    state.modules.delete(module_id).await?;
    tracing::info!(module_id, "Module deleted");
    Ok(StatusCode::NO_CONTENT)
}
