//! Course Studio Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - api: HTTP handlers
//! - config: Command line / environment configuration

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;

use repository::{DbConn, LessonRepository, ModuleRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub modules: Arc<ModuleRepository>,
    pub lessons: Arc<LessonRepository>,
}

impl AppState {
    pub fn new(conn: DbConn) -> Self {
        Self {
            modules: Arc::new(ModuleRepository::new(conn.clone())),
            lessons: Arc::new(LessonRepository::new(conn)),
        }
    }
}
