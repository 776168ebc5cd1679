//! Lesson Wire Types
//!
//! Data structures exchanged with the backend (camelCase JSON).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lesson identifier, stable across requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(pub u32);

/// Module identifier (the parent scope of an ordering)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lesson#{}", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

/// A lesson as seen by the ordering protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub module_id: ModuleId,
    pub title: String,
    /// 1-based position within the module. Unique, not necessarily contiguous on load.
    pub display_order: u32,
}

impl Lesson {
    pub fn new(id: u32, module_id: u32, title: impl Into<String>, display_order: u32) -> Self {
        Self {
            id: LessonId(id),
            module_id: ModuleId(module_id),
            title: title.into(),
            display_order,
        }
    }
}

/// ListSource response: every lesson of one module, ascending `display_order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleLessons {
    pub module_id: ModuleId,
    /// Server-side order revision, bumped by every write touching the module's order
    pub revision: u64,
    pub lessons: Vec<Lesson>,
}

/// One `{id, display_order}` pair of a reorder submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntry {
    pub id: LessonId,
    pub display_order: u32,
}

/// RemoteOrderStore request body. Must cover every lesson of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// Revision the client last read; `None` skips conflict detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_revision: Option<u64>,
    pub order: Vec<OrderEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_wire_format() {
        let lesson = Lesson::new(7, 3, "Intro", 1);
        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "moduleId": 3, "title": "Intro", "displayOrder": 1})
        );
    }

    #[test]
    fn test_reorder_request_omits_missing_revision() {
        let req = ReorderRequest {
            base_revision: None,
            order: vec![OrderEntry { id: LessonId(1), display_order: 1 }],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"order":[{"id":1,"displayOrder":1}]}"#);

        let parsed: ReorderRequest =
            serde_json::from_str(r#"{"baseRevision":4,"order":[]}"#).unwrap();
        assert_eq!(parsed.base_revision, Some(4));
    }
}
