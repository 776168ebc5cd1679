//! Lesson Row Component
//!
//! One draggable lesson. Mouse handlers come from leptos-dragdrop; the
//! coordinator decides whether a drag may start.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::{make_on_mousedown, make_on_mouseleave, make_on_slot_mouseenter, Slot};

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_studio;
use crate::models::{Lesson, ModuleId};

#[component]
pub fn LessonRow(lesson: Lesson, row_slot: Slot, busy: Signal<bool>) -> impl IntoView {
    let slot = row_slot;
    let ctx = use_studio();
    let dnd = ctx.dnd;
    let lesson_id = lesson.id.0;
    let module_id = ModuleId(slot.scope);

    let on_mousedown = make_on_mousedown(dnd, slot, move || !busy.get_untracked());
    let on_mouseenter = make_on_slot_mouseenter(dnd, slot);
    let on_mouseleave = make_on_mouseleave(dnd);

    let row_class = move || {
        let mut c = String::from("lesson-row");
        if dnd.dragging_read.get() == Some(slot) { c.push_str(" dragging"); }
        if dnd.over_read.get() == Some(slot) && dnd.dragging_read.get() != Some(slot) {
            c.push_str(" drop-target");
        }
        if busy.get() { c.push_str(" locked"); }
        c
    };

    let on_delete = move |_: ()| {
        spawn_local(async move {
            if let Err(err) = commands::delete_lesson(lesson_id).await {
                log::warn!("Failed to delete lesson {}: {}", lesson_id, err);
            }
            let coordinator = ctx.coordinator();
            if let Err(err) = coordinator.load(module_id).await {
                log::warn!("Reload after delete failed: {}", err);
            }
            ctx.reload();
        });
    };

    view! {
        <div
            class=row_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <span class="drag-handle" class:disabled=move || busy.get()>"⠿"</span>
            <span class="lesson-order">{lesson.display_order}</span>
            <span class="lesson-title">{lesson.title.clone()}</span>
            <DeleteConfirmButton disabled=busy on_confirm=on_delete />
        </div>
    }
}
