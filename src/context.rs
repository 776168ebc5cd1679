//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use lesson_order::ReorderCoordinator;

use crate::commands::HttpLessonApi;
use crate::timer::GlooTimer;

pub type Coordinator = ReorderCoordinator<HttpLessonApi, GlooTimer>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct StudioContext {
    /// Reorder coordinator; lives on the UI thread only
    pub coordinator: StoredValue<Rc<Coordinator>, LocalStorage>,
    /// Drag state shared by every lesson list
    pub dnd: DndSignals,
    /// Trigger to reload modules from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload modules from backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl StudioContext {
    pub fn new(
        coordinator: Rc<Coordinator>,
        dnd: DndSignals,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            coordinator: StoredValue::new_local(coordinator),
            dnd,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn coordinator(&self) -> Rc<Coordinator> {
        self.coordinator.get_value()
    }

    /// Trigger a reload of the module list
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_studio() -> StudioContext {
    expect_context::<StudioContext>()
}
