//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for reorderable lists in Leptos.
//! Uses movement threshold to distinguish click from drag.
//! Every row is addressed by a `Slot`: the list it belongs to and its index.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// A row position: which list (scope) and where in it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub scope: u32,
    pub index: usize,
}

impl Slot {
    pub fn new(scope: u32, index: usize) -> Self {
        Self { scope, index }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Row being dragged (drag has passed the threshold and was accepted)
    pub dragging_read: ReadSignal<Option<Slot>>,
    pub dragging_write: WriteSignal<Option<Slot>>,
    /// Highlighted drop position
    pub over_read: ReadSignal<Option<Slot>>,
    pub over_write: WriteSignal<Option<Slot>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<Slot>>,
    pub pending_write: WriteSignal<Option<Slot>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Pointer moved far enough from the mousedown point to count as a drag
pub fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<Slot>);
    let (over_read, over_write) = signal(None::<Slot>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<Slot>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        over_read,
        over_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.over_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for a draggable row.
/// Records a pending drag with start position; `can_drag` gates it (e.g. list busy).
pub fn make_on_mousedown<F>(dnd: DndSignals, slot: Slot, can_drag: F) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    F: Fn() -> bool + Copy + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || !can_drag() {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_write.set(Some(slot));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mouseenter handler for rows: highlight as drop position.
/// Only rows of the dragged list qualify.
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: Slot) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_read.get_untracked() {
            if dragging.scope == slot.scope {
                dnd.over_write.set(Some(slot));
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.over_write.set(None);
        }
    }
}

/// Bind document-level mousemove/mouseup handlers.
///
/// `on_start` is asked once the pointer passes the threshold; returning
/// false cancels the pending drag. `on_drop` receives the dragged slot and
/// the highlighted one (None when released outside any row).
pub fn bind_global_handlers<S, D>(dnd: DndSignals, on_start: S, on_drop: D)
where
    S: Fn(Slot) -> bool + 'static,
    D: Fn(Slot, Option<Slot>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_read.get_untracked() else { return };
        if dnd.dragging_read.get_untracked().is_some() {
            return;
        }
        let dx = ev.client_x() - dnd.start_x_read.get_untracked();
        let dy = ev.client_y() - dnd.start_y_read.get_untracked();
        if !exceeds_threshold(dx, dy) {
            return;
        }
        if on_start(pending) {
            dnd.dragging_write.set(Some(pending));
            dnd.over_write.set(Some(pending));
        } else {
            dnd.pending_write.set(None);
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let over = dnd.over_read.get_untracked();

        end_drag(&dnd);
        // Not dragging: click event will fire naturally on the element
        if let Some(dragged) = dragging {
            on_drop(dragged, over);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
    on_mouseup.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold(0, 0));
        assert!(!exceeds_threshold(5, -5));
        assert!(exceeds_threshold(6, 0));
        assert!(exceeds_threshold(0, -6));
    }
}
