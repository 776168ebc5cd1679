//! Lesson Entity
//!
//! A lesson inside a course module. Its `display_order` is unique within
//! the module and kept contiguous (1..N) by every write path.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique identifier
    pub id: u32,
    /// Owning module
    pub module_id: u32,
    pub title: String,
    /// 1-based position within the module
    pub display_order: u32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Lesson {
    /// New lesson, not yet stored (id and order are assigned on create)
    pub fn new(module_id: u32, title: String) -> Self {
        Self {
            id: 0,
            module_id,
            title,
            display_order: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Lesson {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl From<Lesson> for lesson_order::Lesson {
    fn from(lesson: Lesson) -> Self {
        lesson_order::Lesson::new(lesson.id, lesson.module_id, lesson.title, lesson.display_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_creation() {
        let lesson = Lesson::new(3, "Intro".to_string());
        assert_eq!(lesson.id(), 0);
        assert_eq!(lesson.module_id, 3);
        assert_eq!(lesson.display_order, 0);
    }

    #[test]
    fn test_into_wire_lesson() {
        let mut lesson = Lesson::new(3, "Intro".to_string());
        lesson.id = 8;
        lesson.display_order = 2;
        let wire: lesson_order::Lesson = lesson.into();
        assert_eq!(wire, lesson_order::Lesson::new(8, 3, "Intro", 2));
    }
}
