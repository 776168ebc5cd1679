//! Ordered List View Component
//!
//! Lessons of one module in the coordinator's visible order (pending order
//! while a save is in flight, otherwise the last server copy). Drag handles
//! are disabled while the module is busy.

use leptos::prelude::*;

use leptos_dragdrop::Slot;

use crate::components::LessonRow;
use crate::context::use_studio;
use crate::models::{Lesson, LessonId, ModuleId};
use crate::store::{use_app_store, AppStateStoreFields};

/// Everything a row renders from. Index is included: a row's slot changes when the order does.
fn row_key(index: usize, lesson: &Lesson) -> (LessonId, usize, u32, String) {
    (lesson.id, index, lesson.display_order, lesson.title.clone())
}

#[component]
pub fn OrderedListView(module_id: u32) -> impl IntoView {
    let ctx = use_studio();
    let store = use_app_store();
    let module = ModuleId(module_id);

    let lessons = move || {
        let _ = store.reorder_tick().get();
        ctx.coordinator.with_value(|c| c.visible(module))
    };
    let busy = Signal::derive(move || {
        let _ = store.reorder_tick().get();
        ctx.coordinator.with_value(|c| c.is_busy(module))
    });
    let phase_label = move || {
        let _ = store.reorder_tick().get();
        format!("{:?}", ctx.coordinator.with_value(|c| c.phase(module)))
    };

    view! {
        <div class="lesson-list" class:busy=move || busy.get()>
            <div class="lesson-list-status">
                <span class="phase">{phase_label}</span>
                {move || busy.get().then(|| view! { <span class="saving">"Saving order…"</span> })}
            </div>
            <For
                each=move || lessons().into_iter().enumerate()
                key=|(index, lesson)| row_key(*index, lesson)
                children=move |(index, lesson)| {
                    view! {
                        <LessonRow lesson=lesson row_slot=Slot::new(module_id, index) busy=busy />
                    }
                }
            />
            {move || lessons().is_empty().then(|| view! {
                <p class="empty-hint">"No lessons yet."</p>
            })}
        </div>
    }
}
