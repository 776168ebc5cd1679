//! Repository Integration Tests
//!
//! Tests for Module and Lesson repositories with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, Lesson, Module};
    use crate::repository::{
        init_db, LessonPositioningOperations, LessonRepository, ModuleRepository, Repository,
    };
    use lesson_order::{LessonId, OrderEntry, ReorderRequest};
    use std::path::Path;

    struct Fixture {
        modules: ModuleRepository,
        lessons: LessonRepository,
    }

    async fn setup_test_db() -> Fixture {
        // Use in-memory database for tests
        let conn = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        Fixture {
            modules: ModuleRepository::new(conn.clone()),
            lessons: LessonRepository::new(conn),
        }
    }

    /// Module with lessons titled after `titles`, in that order
    async fn module_with(fx: &Fixture, titles: &[&str]) -> (u32, Vec<u32>) {
        let module = fx.modules.create(&Module::new("Basics".to_string())).await.unwrap();
        let mut ids = Vec::new();
        for title in titles {
            let lesson = fx
                .lessons
                .create(&Lesson::new(module.id, title.to_string()))
                .await
                .unwrap();
            ids.push(lesson.id);
        }
        (module.id, ids)
    }

    fn request(base_revision: Option<u64>, ids: &[u32]) -> ReorderRequest {
        ReorderRequest {
            base_revision,
            order: ids
                .iter()
                .enumerate()
                .map(|(index, id)| OrderEntry {
                    id: LessonId(*id),
                    display_order: index as u32 + 1,
                })
                .collect(),
        }
    }

    fn titles(list: &lesson_order::ModuleLessons) -> Vec<String> {
        list.lessons.iter().map(|l| l.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_create_appends_in_order() {
        let fx = setup_test_db().await;
        let (module_id, _) = module_with(&fx, &["A", "B", "C"]).await;

        let listed = fx.lessons.list_by_module(module_id).await.unwrap();
        assert_eq!(titles(&listed), ["A", "B", "C"]);
        let orders: Vec<u32> = listed.lessons.iter().map(|l| l.display_order).collect();
        assert_eq!(orders, [1, 2, 3]);
        // initial 1 + three creates
        assert_eq!(listed.revision, 4);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_module_and_empty_title() {
        let fx = setup_test_db().await;
        let missing = fx.lessons.create(&Lesson::new(42, "Orphan".to_string())).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));

        let (module_id, _) = module_with(&fx, &[]).await;
        let empty = fx.lessons.create(&Lesson::new(module_id, "  ".to_string())).await;
        assert!(matches!(empty, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_reorder_stores_and_bumps_revision() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B", "C", "D"]).await;
        let base = fx.lessons.list_by_module(module_id).await.unwrap().revision;

        let stored = fx
            .lessons
            .reorder_lessons(module_id, &request(Some(base), &[ids[1], ids[2], ids[0], ids[3]]))
            .await
            .unwrap();

        assert_eq!(titles(&stored), ["B", "C", "A", "D"]);
        assert_eq!(stored.revision, base + 1);
        assert_eq!(fx.lessons.list_by_module(module_id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_reorder_normalizes_gapped_orders() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B", "C"]).await;

        let gapped = ReorderRequest {
            base_revision: None,
            order: vec![
                OrderEntry { id: LessonId(ids[0]), display_order: 30 },
                OrderEntry { id: LessonId(ids[1]), display_order: 5 },
                OrderEntry { id: LessonId(ids[2]), display_order: 17 },
            ],
        };
        let stored = fx.lessons.reorder_lessons(module_id, &gapped).await.unwrap();

        assert_eq!(titles(&stored), ["B", "C", "A"]);
        let orders: Vec<u32> = stored.lessons.iter().map(|l| l.display_order).collect();
        assert_eq!(orders, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_invalid_payloads_atomically() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B", "C"]).await;
        let (other_module, other_ids) = module_with(&fx, &["X"]).await;
        let before = fx.lessons.list_by_module(module_id).await.unwrap();

        let bad = [
            request(None, &[ids[0], ids[1]]),
            request(None, &[ids[0], ids[0], ids[2]]),
            request(None, &[ids[0], ids[1], 999]),
            request(None, &[ids[2], ids[1], ids[0], other_ids[0]]),
        ];
        for req in &bad {
            let result = fx.lessons.reorder_lessons(module_id, req).await;
            assert!(matches!(result, Err(DomainError::InvalidInput(_))), "{:?}", req);
        }

        let cross = fx
            .lessons
            .reorder_lessons(module_id, &request(None, &[ids[0], ids[1], other_ids[0]]))
            .await;
        match cross {
            Err(DomainError::InvalidInput(msg)) => {
                assert!(msg.contains(&format!("module {}", other_module)), "{}", msg)
            }
            other => panic!("expected cross-module rejection, got {:?}", other),
        }

        assert_eq!(fx.lessons.list_by_module(module_id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_reorder_detects_stale_revision() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B"]).await;
        let base = fx.lessons.list_by_module(module_id).await.unwrap().revision;

        // Another client gets there first
        fx.lessons
            .reorder_lessons(module_id, &request(Some(base), &[ids[1], ids[0]]))
            .await
            .unwrap();

        let late = fx
            .lessons
            .reorder_lessons(module_id, &request(Some(base), &[ids[0], ids[1]]))
            .await;
        assert!(matches!(late, Err(DomainError::Conflict(_))));
        let listed = fx.lessons.list_by_module(module_id).await.unwrap();
        assert_eq!(titles(&listed), ["B", "A"]);
    }

    #[tokio::test]
    async fn test_reorder_unknown_module() {
        let fx = setup_test_db().await;
        let result = fx.lessons.reorder_lessons(77, &request(None, &[])).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_reindexes_siblings() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B", "C"]).await;
        let before = fx.lessons.list_by_module(module_id).await.unwrap().revision;

        fx.lessons.delete(ids[0]).await.unwrap();

        let listed = fx.lessons.list_by_module(module_id).await.unwrap();
        assert_eq!(titles(&listed), ["B", "C"]);
        let orders: Vec<u32> = listed.lessons.iter().map(|l| l.display_order).collect();
        assert_eq!(orders, [1, 2]);
        assert_eq!(listed.revision, before + 1);

        assert!(matches!(fx.lessons.delete(ids[0]).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_title_keeps_order() {
        let fx = setup_test_db().await;
        let (module_id, ids) = module_with(&fx, &["A", "B"]).await;

        let before = fx.lessons.list_by_module(module_id).await.unwrap().revision;

        let edit = Lesson {
            id: ids[1],
            display_order: 99,
            ..Lesson::new(module_id, " Renamed ".to_string())
        };
        let stored = fx.lessons.update(&edit).await.unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.display_order, 2);

        let listed = fx.lessons.list_by_module(module_id).await.unwrap();
        assert_eq!(titles(&listed), ["A", "Renamed"]);
        assert_eq!(listed.lessons[1].display_order, 2);
        // Renames do not touch the order revision
        assert_eq!(listed.revision, before);

        let missing = Lesson { id: 999, ..edit };
        assert!(matches!(fx.lessons.update(&missing).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_module_summaries_and_delete() {
        let fx = setup_test_db().await;
        let (first, _) = module_with(&fx, &["A", "B"]).await;
        let (second, _) = module_with(&fx, &[]).await;

        let summaries = fx.modules.list_summaries().await.unwrap();
        let counts: Vec<(u32, u32)> = summaries.iter().map(|m| (m.id, m.lesson_count)).collect();
        assert_eq!(counts, [(first, 2), (second, 0)]);

        fx.modules.delete(first).await.unwrap();
        let remaining: Vec<u32> = fx.modules.list_summaries().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(remaining, [second]);
        assert!(matches!(fx.lessons.list_by_module(first).await, Err(DomainError::NotFound(_))));
        assert!(matches!(fx.modules.delete(first).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_module_rename_keeps_revision() {
        let fx = setup_test_db().await;
        let (module_id, _) = module_with(&fx, &["A"]).await;

        let edit = Module { id: module_id, ..Module::new("Advanced".to_string()) };
        let stored = fx.modules.update(&edit).await.unwrap();
        assert_eq!(stored.title, "Advanced");
        assert_eq!(stored.order_revision, 2);

        let blank = Module { id: module_id, ..Module::new(" ".to_string()) };
        assert!(matches!(fx.modules.update(&blank).await, Err(DomainError::InvalidInput(_))));
        let missing = Module { id: 404, ..edit };
        assert!(matches!(fx.modules.update(&missing).await, Err(DomainError::NotFound(_))));
    }
}
