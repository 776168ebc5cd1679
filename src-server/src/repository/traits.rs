//! Repository Layer - Core Traits
//!
//! Storage-agnostic CRUD shared by modules and lessons. Ordering-specific
//! operations live in `LessonPositioningOperations`.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// CRUD over one entity table
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert and return the stored row (with its assigned id)
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Overwrite editable fields and return the stored row; NotFound if it is gone
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Remove a row and whatever depends on it
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
