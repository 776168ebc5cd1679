//! HTTP API
//!
//! REST handlers exposing modules and lessons to the frontend. The lesson
//! endpoints are the ListSource (`GET .../lessons`) and RemoteOrderStore
//! (`PUT .../lessons/order`) the client-side reorder coordinator talks to.

mod error;
mod lesson_api;
mod module_api;

use axum::routing::{get, patch, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use error::ApiErrorBody;

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/modules", get(module_api::list_modules).post(module_api::create_module))
        .route(
            "/api/modules/{id}",
            patch(module_api::rename_module).delete(module_api::delete_module),
        )
        .route(
            "/api/modules/{id}/lessons",
            get(lesson_api::list_lessons).post(lesson_api::create_lesson),
        )
        .route("/api/modules/{id}/lessons/order", put(lesson_api::reorder_lessons))
        .route(
            "/api/lessons/{id}",
            patch(lesson_api::rename_lesson).delete(lesson_api::delete_lesson),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
