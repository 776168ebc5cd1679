//! Reorder Coordinator
//!
//! Owns the lesson lists of every loaded module and runs the reorder
//! protocol for each of them independently:
//!
//! ```text
//! Idle --drop--> Submitting --ok/err--> Reconciling --read done--> Idle
//! ```
//!
//! The authoritative list of a module is only ever replaced by a ListSource
//! read or by the list the store returns after a successful write. A locally
//! computed order is shown as a pending overlay while `Submitting` and is
//! never promoted to authoritative state.

use futures::future::{self, Either};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{ErrorKind, OrderError, OrderResult};
use crate::lesson::{Lesson, ModuleId, ModuleLessons, ReorderRequest};
use crate::reorder::{compute_reorder, order_entries, validate_order};
use crate::source::LessonApi;
use crate::timer::Timer;
use crate::transaction::DragTransaction;

/// Upper bound on a single remote call before it counts as a transport failure
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Applied to the submission and to the reconciliation/recovery read after it
    pub submit_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

/// Reorder state of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Reconciling,
}

/// Last authoritative copy of a module's lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedList {
    pub module_id: ModuleId,
    /// Server revision of this copy; `None` until the first read
    pub revision: Option<u64>,
    /// Local counter, bumped every time the copy is replaced
    pub version: u64,
    pub lessons: Vec<Lesson>,
}

impl OrderedList {
    fn empty(module_id: ModuleId) -> Self {
        Self {
            module_id,
            revision: None,
            version: 0,
            lessons: Vec::new(),
        }
    }
}

/// Why a drop never reached the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// No drag was started (or it was already consumed)
    NoDrag,
    /// A reorder was in flight for the module
    Busy,
    /// The list was replaced after the drag started
    StaleSnapshot,
    OutOfRange,
}

/// Result of a drop gesture. Failures are already recovered when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped where it started
    Unchanged,
    Discarded(DiscardReason),
    /// Stored; carries the server's canonical list
    Saved(ModuleLessons),
    /// Store rejected or never answered; local state was reloaded from ListSource
    RolledBack(OrderError),
}

/// Notifications for the surrounding UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderEvent {
    PhaseChanged { module_id: ModuleId, phase: Phase },
    ListReplaced { module_id: ModuleId, version: u64 },
    /// A submission finished, after reconciliation or recovery
    Completed {
        module_id: ModuleId,
        result: Result<(), OrderError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

type Listener = Rc<dyn Fn(&ReorderEvent)>;

struct ModuleSlot {
    list: OrderedList,
    phase: Phase,
    pending: Option<Vec<Lesson>>,
    drag: Option<DragTransaction>,
    /// Bumped when a load or a submission starts; a load only lands if it is still the latest
    generation: u64,
}

impl ModuleSlot {
    fn new(module_id: ModuleId) -> Self {
        Self {
            list: OrderedList::empty(module_id),
            phase: Phase::Idle,
            pending: None,
            drag: None,
            generation: 0,
        }
    }
}

/// Per-module reorder state machines sharing one backend handle
pub struct ReorderCoordinator<A, T> {
    api: A,
    timer: T,
    config: CoordinatorConfig,
    modules: RefCell<HashMap<ModuleId, ModuleSlot>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<usize>,
}

impl<A: LessonApi, T: Timer> ReorderCoordinator<A, T> {
    pub fn new(api: A, timer: T) -> Self {
        Self::with_config(api, timer, CoordinatorConfig::default())
    }

    pub fn with_config(api: A, timer: T, config: CoordinatorConfig) -> Self {
        Self {
            api,
            timer,
            config,
            modules: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> CoordinatorConfig {
        self.config
    }

    // ========================
    // Listeners
    // ========================

    pub fn subscribe(&self, listener: impl Fn(&ReorderEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn emit(&self, event: ReorderEvent) {
        // Listeners may call back into the coordinator
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn phase(&self, module_id: ModuleId) -> Phase {
        self.modules
            .borrow()
            .get(&module_id)
            .map(|slot| slot.phase)
            .unwrap_or_default()
    }

    /// True while `Submitting` or `Reconciling`; drag handles should be disabled
    pub fn is_busy(&self, module_id: ModuleId) -> bool {
        self.phase(module_id) != Phase::Idle
    }

    /// The last authoritative copy, ignoring any pending overlay
    pub fn snapshot(&self, module_id: ModuleId) -> Option<OrderedList> {
        self.modules
            .borrow()
            .get(&module_id)
            .map(|slot| slot.list.clone())
    }

    /// What the view should render right now
    pub fn visible(&self, module_id: ModuleId) -> Vec<Lesson> {
        self.modules
            .borrow()
            .get(&module_id)
            .map(|slot| match &slot.pending {
                Some(pending) => pending.clone(),
                None => slot.list.lessons.clone(),
            })
            .unwrap_or_default()
    }

    pub fn drag(&self, module_id: ModuleId) -> Option<DragTransaction> {
        self.modules
            .borrow()
            .get(&module_id)
            .and_then(|slot| slot.drag)
    }

    // ========================
    // Loading
    // ========================

    /// Initial ListSource read for a module
    pub async fn load(&self, module_id: ModuleId) -> OrderResult<()> {
        let generation = {
            let mut modules = self.modules.borrow_mut();
            let slot = modules
                .entry(module_id)
                .or_insert_with(|| ModuleSlot::new(module_id));
            if slot.phase != Phase::Idle {
                return Err(OrderError::Busy(module_id));
            }
            slot.generation += 1;
            slot.generation
        };
        let fetched = self.with_timeout(self.api.fetch_lessons(module_id)).await?;
        if !self.accepts_load(module_id, generation, fetched.revision) {
            debug!(
                "Load of {} at revision {} superseded by a later load or reorder",
                module_id, fetched.revision
            );
            return Ok(());
        }
        self.replace_authoritative(module_id, fetched);
        Ok(())
    }

    /// A load lands only if nothing started after it and it is not older than what we hold
    fn accepts_load(&self, module_id: ModuleId, generation: u64, revision: u64) -> bool {
        self.modules.borrow().get(&module_id).is_some_and(|slot| {
            slot.phase == Phase::Idle
                && slot.generation == generation
                && slot.list.revision.map_or(true, |held| revision >= held)
        })
    }

    fn replace_authoritative(&self, module_id: ModuleId, fetched: ModuleLessons) {
        let version = {
            let mut modules = self.modules.borrow_mut();
            let slot = modules
                .entry(module_id)
                .or_insert_with(|| ModuleSlot::new(module_id));
            let mut lessons = fetched.lessons;
            lessons.sort_by_key(|lesson| lesson.display_order);
            slot.list = OrderedList {
                module_id,
                revision: Some(fetched.revision),
                version: slot.list.version + 1,
                lessons,
            };
            slot.list.version
        };
        self.emit(ReorderEvent::ListReplaced { module_id, version });
    }

    fn set_phase(&self, module_id: ModuleId, phase: Phase) {
        if let Some(slot) = self.modules.borrow_mut().get_mut(&module_id) {
            slot.phase = phase;
            if phase != Phase::Submitting {
                slot.pending = None;
            }
        }
        self.emit(ReorderEvent::PhaseChanged { module_id, phase });
    }

    // ========================
    // Gestures
    // ========================

    /// Start a drag at `index`. Rejected while a reorder is in flight.
    pub fn begin_drag(&self, module_id: ModuleId, index: usize) -> OrderResult<()> {
        let mut modules = self.modules.borrow_mut();
        let slot = modules
            .get_mut(&module_id)
            .ok_or_else(|| OrderError::InvalidGesture(format!("{} is not loaded", module_id)))?;
        if slot.phase != Phase::Idle {
            debug!("Drag on {} ignored while {:?}", module_id, slot.phase);
            return Err(OrderError::Busy(module_id));
        }
        if index >= slot.list.lessons.len() {
            return Err(OrderError::InvalidGesture(format!(
                "drag start {} out of range for {} lessons",
                index,
                slot.list.lessons.len()
            )));
        }
        slot.drag = Some(DragTransaction::new(module_id, index, slot.list.version));
        Ok(())
    }

    /// Highlight a drop position. Presentational only.
    pub fn drag_over(&self, module_id: ModuleId, index: usize) {
        if let Some(slot) = self.modules.borrow_mut().get_mut(&module_id) {
            let len = slot.list.lessons.len();
            if let Some(tx) = slot.drag.as_mut() {
                if index < len {
                    tx.hover(index);
                }
            }
        }
    }

    /// Abandon the current gesture (pointer released outside the list)
    pub fn cancel_drag(&self, module_id: ModuleId) {
        if let Some(slot) = self.modules.borrow_mut().get_mut(&module_id) {
            slot.drag = None;
        }
    }

    /// Finish the gesture at `index`: compute, submit, reconcile.
    pub async fn drop_at(&self, module_id: ModuleId, index: usize) -> DropOutcome {
        let candidate = {
            let mut modules = self.modules.borrow_mut();
            let Some(slot) = modules.get_mut(&module_id) else {
                return DropOutcome::Discarded(DiscardReason::NoDrag);
            };
            let Some(mut tx) = slot.drag.take() else {
                return DropOutcome::Discarded(DiscardReason::NoDrag);
            };
            if slot.phase != Phase::Idle {
                debug!("Drop on {} ignored while {:?}", module_id, slot.phase);
                return DropOutcome::Discarded(DiscardReason::Busy);
            }
            if !tx.is_current(slot.list.version) {
                debug!(
                    "Drop on {} discarded: list changed (v{} -> v{})",
                    module_id, tx.snapshot_version, slot.list.version
                );
                return DropOutcome::Discarded(DiscardReason::StaleSnapshot);
            }
            tx.hover(index);
            if tx.is_noop() {
                return DropOutcome::Unchanged;
            }
            match compute_reorder(&slot.list.lessons, tx.source_index, tx.target_index) {
                Ok(list) => list,
                Err(e) => {
                    debug!("Drop on {} discarded: {}", module_id, e);
                    return DropOutcome::Discarded(DiscardReason::OutOfRange);
                }
            }
        };

        match self.submit_reorder(module_id, candidate).await {
            Ok(saved) => DropOutcome::Saved(saved),
            Err(e) => DropOutcome::RolledBack(e),
        }
    }

    // ========================
    // Submission
    // ========================

    /// Persist `new_list` as the full order of `module_id`.
    ///
    /// On success the store's list becomes authoritative and a reconciliation
    /// read follows. On any failure the local order is dropped and a recovery
    /// read restores whatever ListSource reports. Either way the module is
    /// `Idle` again when this returns.
    pub async fn submit_reorder(&self, module_id: ModuleId, new_list: Vec<Lesson>) -> OrderResult<ModuleLessons> {
        let request = {
            let mut modules = self.modules.borrow_mut();
            let slot = modules
                .get_mut(&module_id)
                .ok_or_else(|| OrderError::InvalidGesture(format!("{} is not loaded", module_id)))?;
            if slot.phase != Phase::Idle {
                return Err(OrderError::Busy(module_id));
            }
            if let Some(foreign) = new_list.iter().find(|lesson| lesson.module_id != module_id) {
                return Err(OrderError::InvalidGesture(format!(
                    "{} belongs to {}, not {}",
                    foreign.id, foreign.module_id, module_id
                )));
            }
            let request = ReorderRequest {
                base_revision: slot.list.revision,
                order: order_entries(&new_list),
            };
            // Partial or duplicated lists never leave the client
            validate_order(module_id, &slot.list.lessons, &request.order)
                .map_err(|e| OrderError::InvalidGesture(e.to_string()))?;
            slot.pending = Some(new_list);
            slot.drag = None;
            slot.generation += 1;
            request
        };
        self.set_phase(module_id, Phase::Submitting);
        info!("Submitting order of {} lessons for {}", request.order.len(), module_id);

        let result = self.with_timeout(self.api.save_order(module_id, &request)).await;

        self.set_phase(module_id, Phase::Reconciling);
        match &result {
            Ok(saved) => {
                info!("Order for {} stored at revision {}", module_id, saved.revision);
                self.replace_authoritative(module_id, saved.clone());
            }
            Err(e) => log_failure(module_id, e),
        }

        match self.with_timeout(self.api.fetch_lessons(module_id)).await {
            Ok(fresh) => self.replace_authoritative(module_id, fresh),
            Err(e) if result.is_ok() => {
                warn!("Reconciliation read for {} failed, keeping stored order: {}", module_id, e);
            }
            Err(e) => {
                error!("Recovery read for {} failed, keeping last known order: {}", module_id, e);
            }
        }

        self.set_phase(module_id, Phase::Idle);
        self.emit(ReorderEvent::Completed {
            module_id,
            result: result.as_ref().map(|_| ()).map_err(|e| e.clone()),
        });
        result
    }

    async fn with_timeout<R>(&self, call: impl Future<Output = OrderResult<R>>) -> OrderResult<R> {
        let timeout = self.config.submit_timeout;
        let sleep = self.timer.sleep(timeout);
        futures::pin_mut!(call);
        match future::select(call, sleep).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(OrderError::Timeout(timeout)),
        }
    }
}

fn log_failure(module_id: ModuleId, e: &OrderError) {
    match e.kind() {
        ErrorKind::Validation => {
            error!("Store rejected order for {} as invalid, reloading: {}", module_id, e)
        }
        ErrorKind::Conflict => {
            warn!("Order for {} changed concurrently, reloading: {}", module_id, e)
        }
        ErrorKind::Transport => warn!("Could not save order for {}, reloading: {}", module_id, e),
        ErrorKind::Local => debug!("Reorder for {} not sent: {}", module_id, e),
    }
}
