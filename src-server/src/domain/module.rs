//! Module Entity
//!
//! A course module: the container a lesson ordering is scoped to.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: u32,
    pub title: String,
    /// Bumped by every write that changes the lesson order (create, delete, reorder)
    pub order_revision: u64,
    pub created_at: Option<i64>,
}

impl Module {
    pub fn new(title: String) -> Self {
        Self {
            id: 0,
            title,
            order_revision: 1,
            created_at: None,
        }
    }
}

impl Entity for Module {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Module listing row with its lesson count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: u32,
    pub title: String,
    pub lesson_count: u32,
}
