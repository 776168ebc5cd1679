//! Frontend Data Models
//!
//! Lesson types come from `lesson-order`; modules are plain wire structs.

use serde::{Deserialize, Serialize};

pub use lesson_order::{Lesson, LessonId, ModuleId, ModuleLessons};

/// Module listing row as returned by `GET /api/modules`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: u32,
    pub title: String,
    pub lesson_count: u32,
}

/// Module as returned on creation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: u32,
    pub title: String,
    pub order_revision: u64,
}
