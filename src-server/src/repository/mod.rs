//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod module_repo;
mod lesson;

#[cfg(test)]
mod tests;

pub use traits::Repository;
pub use db::{init_db, DbConn};
pub use module_repo::ModuleRepository;
pub use lesson::{LessonPositioningOperations, LessonRepository};
