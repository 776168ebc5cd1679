//! Scripted in-process backend for coordinator tests.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::Notify;

use lesson_order::{
    validate_order, Lesson, ListSource, ModuleId, ModuleLessons, OrderError, OrderResult, Phase,
    RemoteOrderStore, ReorderCoordinator, ReorderRequest, Timer,
};

pub const MODULE_A: ModuleId = ModuleId(10);
pub const MODULE_B: ModuleId = ModuleId(20);

pub struct TokioTimer;

impl Timer for TokioTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}

/// Behaviour of the next `save_order` call (default: apply)
pub enum SaveScript {
    Apply,
    Fail(OrderError),
    /// Wait for the notify, then apply
    Gate(Rc<Notify>),
    /// Return this list without touching server state
    Respond(ModuleLessons),
    Hang,
}

/// Behaviour of the next `fetch_lessons` call (default: serve)
pub enum FetchScript {
    Serve,
    Fail(OrderError),
    Gate(Rc<Notify>),
    /// Read the state when the request is sent, answer after the notify
    Delayed(Rc<Notify>),
}

#[derive(Default)]
pub struct FakeApi {
    pub state: RefCell<HashMap<ModuleId, ModuleLessons>>,
    pub saves: RefCell<VecDeque<SaveScript>>,
    pub fetches: RefCell<VecDeque<FetchScript>>,
    pub save_calls: Cell<usize>,
    pub fetch_calls: Cell<usize>,
    pub requests: RefCell<Vec<(ModuleId, ReorderRequest)>>,
}

impl FakeApi {
    /// MODULE_A: A B C D (gapped orders), MODULE_B: X Y Z
    pub fn seeded() -> Self {
        let api = FakeApi::default();
        api.put(
            MODULE_A,
            vec![
                Lesson::new(1, 10, "A", 10),
                Lesson::new(2, 10, "B", 20),
                Lesson::new(3, 10, "C", 30),
                Lesson::new(4, 10, "D", 40),
            ],
        );
        api.put(
            MODULE_B,
            vec![
                Lesson::new(7, 20, "X", 1),
                Lesson::new(8, 20, "Y", 2),
                Lesson::new(9, 20, "Z", 3),
            ],
        );
        api
    }

    pub fn put(&self, module_id: ModuleId, lessons: Vec<Lesson>) {
        self.state.borrow_mut().insert(
            module_id,
            ModuleLessons {
                module_id,
                revision: 1,
                lessons,
            },
        );
    }

    /// Simulate another client rewriting the order (bumps the revision)
    pub fn rewrite_elsewhere(&self, module_id: ModuleId, titles: &[&str]) {
        let mut state = self.state.borrow_mut();
        let current = state.get_mut(&module_id).expect("seeded module");
        let mut lessons = Vec::new();
        for (index, title) in titles.iter().enumerate() {
            let mut lesson = current
                .lessons
                .iter()
                .find(|l| l.title == *title)
                .expect("known title")
                .clone();
            lesson.display_order = index as u32 + 1;
            lessons.push(lesson);
        }
        current.lessons = lessons;
        current.revision += 1;
    }

    pub fn server_list(&self, module_id: ModuleId) -> Vec<Lesson> {
        self.state.borrow()[&module_id].lessons.clone()
    }

    pub fn script_save(&self, script: SaveScript) {
        self.saves.borrow_mut().push_back(script);
    }

    pub fn script_fetch(&self, script: FetchScript) {
        self.fetches.borrow_mut().push_back(script);
    }

    fn apply(&self, module_id: ModuleId, request: &ReorderRequest) -> OrderResult<ModuleLessons> {
        let mut state = self.state.borrow_mut();
        let current = state
            .get_mut(&module_id)
            .ok_or_else(|| OrderError::NotFound(module_id.to_string()))?;
        if let Some(base) = request.base_revision {
            if base != current.revision {
                return Err(OrderError::Conflict(format!(
                    "revision {} is stale, current is {}",
                    base, current.revision
                )));
            }
        }
        validate_order(module_id, &current.lessons, &request.order)?;

        let mut order = request.order.clone();
        order.sort_by_key(|entry| entry.display_order);
        let lessons = order
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut lesson = current
                    .lessons
                    .iter()
                    .find(|l| l.id == entry.id)
                    .cloned()
                    .expect("validated id");
                lesson.display_order = index as u32 + 1;
                lesson
            })
            .collect();
        current.lessons = lessons;
        current.revision += 1;
        Ok(current.clone())
    }
}

#[async_trait(?Send)]
impl ListSource for FakeApi {
    async fn fetch_lessons(&self, module_id: ModuleId) -> OrderResult<ModuleLessons> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        let script = self.fetches.borrow_mut().pop_front().unwrap_or(FetchScript::Serve);
        match script {
            FetchScript::Serve => {}
            FetchScript::Fail(e) => return Err(e),
            FetchScript::Gate(gate) => gate.notified().await,
            FetchScript::Delayed(gate) => {
                let sent = self.state.borrow().get(&module_id).cloned();
                gate.notified().await;
                return sent.ok_or_else(|| OrderError::NotFound(module_id.to_string()));
            }
        }
        self.state
            .borrow()
            .get(&module_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(module_id.to_string()))
    }
}

#[async_trait(?Send)]
impl RemoteOrderStore for FakeApi {
    async fn save_order(&self, module_id: ModuleId, request: &ReorderRequest) -> OrderResult<ModuleLessons> {
        self.save_calls.set(self.save_calls.get() + 1);
        self.requests.borrow_mut().push((module_id, request.clone()));
        let script = self.saves.borrow_mut().pop_front().unwrap_or(SaveScript::Apply);
        match script {
            SaveScript::Apply => self.apply(module_id, request),
            SaveScript::Fail(e) => Err(e),
            SaveScript::Gate(gate) => {
                gate.notified().await;
                self.apply(module_id, request)
            }
            SaveScript::Respond(list) => Ok(list),
            SaveScript::Hang => futures::future::pending().await,
        }
    }
}

pub type TestCoordinator = ReorderCoordinator<FakeApi, TokioTimer>;

pub async fn loaded(api: FakeApi) -> TestCoordinator {
    let coordinator = ReorderCoordinator::new(api, TokioTimer);
    coordinator.load(MODULE_A).await.expect("load module A");
    coordinator.load(MODULE_B).await.expect("load module B");
    coordinator
}

pub fn titles(list: &[Lesson]) -> Vec<&str> {
    list.iter().map(|l| l.title.as_str()).collect()
}

pub fn orders(list: &[Lesson]) -> Vec<u32> {
    list.iter().map(|l| l.display_order).collect()
}

/// Yield until `module_id` reaches `phase`
pub async fn wait_for_phase(coordinator: &TestCoordinator, module_id: ModuleId, phase: Phase) {
    for _ in 0..100 {
        if coordinator.phase(module_id) == phase {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("{} never reached {:?}", module_id, phase);
}

/// Yield until the backend has seen `count` reads
pub async fn wait_for_fetches(coordinator: &TestCoordinator, count: usize) {
    for _ in 0..100 {
        if coordinator.api().fetch_calls.get() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("backend never saw {} reads", count);
}
