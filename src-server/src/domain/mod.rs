//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde and the shared
//! ordering types).

mod entity;
mod lesson;
mod module;

pub use entity::{Entity, DomainError, DomainResult};
pub use lesson::Lesson;
pub use module::{Module, ModuleSummary};
