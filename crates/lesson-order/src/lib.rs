//! Lesson Ordering
//!
//! Drag-and-drop reordering of lessons within a module, and the protocol
//! that persists a new order against the backend:
//! - lesson: wire types shared with the server
//! - reorder: pure splice-and-renumber plus order validation
//! - transaction: the ephemeral drag gesture
//! - source: the ListSource / RemoteOrderStore collaborators
//! - coordinator: per-module state machine (submit, reconcile, recover)

mod coordinator;
mod error;
mod lesson;
mod reorder;
mod source;
mod timer;
mod transaction;

pub use coordinator::{
    CoordinatorConfig, DiscardReason, DropOutcome, ListenerId, OrderedList, Phase,
    ReorderCoordinator, ReorderEvent, DEFAULT_SUBMIT_TIMEOUT,
};
pub use error::{ErrorKind, OrderError, OrderResult};
pub use lesson::{Lesson, LessonId, ModuleId, ModuleLessons, OrderEntry, ReorderRequest};
pub use reorder::{compute_reorder, order_entries, validate_order};
pub use source::{LessonApi, ListSource, RemoteOrderStore};
pub use timer::Timer;
pub use transaction::DragTransaction;
