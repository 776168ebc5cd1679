//! Lesson Repository Module
//!
//! - lesson_repo: Core CRUD operations
//! - lesson_positioning: Ordering (module listing, full reorder) and the helpers create/delete share

mod lesson_repo;
mod lesson_positioning;

pub use lesson_repo::LessonRepository;
pub use lesson_positioning::LessonPositioningOperations;
