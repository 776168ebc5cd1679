//! Backend Collaborators
//!
//! The two remote endpoints the coordinator talks to. Implementations live
//! with the transport (HTTP in the browser, scripted fakes in tests).
//! Futures are not `Send`: everything runs on the UI event loop.

use async_trait::async_trait;

use crate::error::OrderResult;
use crate::lesson::{ModuleId, ModuleLessons, ReorderRequest};

/// Read side: the current authoritative list of a module
#[async_trait(?Send)]
pub trait ListSource {
    /// All lessons of `module_id`, ascending `display_order`
    async fn fetch_lessons(&self, module_id: ModuleId) -> OrderResult<ModuleLessons>;
}

/// Write side: atomic full-list reorder
#[async_trait(?Send)]
pub trait RemoteOrderStore {
    /// Persist `request` for `module_id` and return the canonical stored list.
    ///
    /// Either every lesson's order is updated or none is.
    async fn save_order(&self, module_id: ModuleId, request: &ReorderRequest) -> OrderResult<ModuleLessons>;
}

/// Both collaborators behind one handle
pub trait LessonApi: ListSource + RemoteOrderStore {}

impl<T: ListSource + RemoteOrderStore> LessonApi for T {}
