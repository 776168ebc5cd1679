//! Course Studio Frontend App
//!
//! Two-column layout: module sidebar and the lesson list of the current module.
//! Wires the reorder coordinator to the store and the drag-and-drop signals.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use leptos_dragdrop::{bind_global_handlers, create_dnd_signals, Slot};
use lesson_order::{DropOutcome, ReorderCoordinator, ReorderEvent};

use crate::commands::{self, HttpLessonApi};
use crate::components::{ModuleSidebar, NewLessonForm, OrderedListView, ReorderNotice};
use crate::context::{Coordinator, StudioContext};
use crate::models::ModuleId;
use crate::store::{
    notice_for, store_bump_reorder_tick, store_show_notice, AppState, AppStateStoreFields, AppStore,
};
use crate::timer::GlooTimer;

#[component]
pub fn App() -> impl IntoView {
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let dnd = create_dnd_signals();
    let coordinator: Rc<Coordinator> = Rc::new(ReorderCoordinator::new(HttpLessonApi::default(), GlooTimer));

    coordinator.subscribe(move |event| {
        store_bump_reorder_tick(&store);
        if let ReorderEvent::Completed { module_id, result: Err(err) } = event {
            log::info!("Reorder of {} ended with {}", module_id, err);
            if let Some(notice) = notice_for(err) {
                store_show_notice(&store, notice);
            }
        }
    });

    let ctx = StudioContext::new(coordinator.clone(), dnd, (reload_trigger, set_reload_trigger));
    provide_context(ctx);

    // Pointer handlers are document-wide; bind them once for every list
    let on_start = {
        let coordinator = coordinator.clone();
        move |slot: Slot| match coordinator.begin_drag(ModuleId(slot.scope), slot.index) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("[DND] Drag refused: {}", err);
                false
            }
        }
    };
    let on_drop = move |dragged: Slot, over: Option<Slot>| {
        let module_id = ModuleId(dragged.scope);
        let Some(target) = over.filter(|slot| slot.scope == dragged.scope) else {
            coordinator.cancel_drag(module_id);
            store_bump_reorder_tick(&store);
            return;
        };
        let coordinator = coordinator.clone();
        spawn_local(async move {
            match coordinator.drop_at(module_id, target.index).await {
                DropOutcome::Saved(list) => {
                    log::debug!("[DND] Saved {} at revision {}", module_id, list.revision)
                }
                DropOutcome::RolledBack(err) => log::debug!("[DND] Rolled back {}: {}", module_id, err),
                other => log::debug!("[DND] {:?}", other),
            }
            // Lesson counts do not change, but keep the sidebar in step with the server
            ctx.reload();
        });
    };
    bind_global_handlers(dnd, on_start, on_drop);

    // Hover position feeds the in-progress drag transaction
    Effect::new(move |_| {
        if let Some(slot) = dnd.over_read.get() {
            ctx.coordinator
                .with_value(|c| c.drag_over(ModuleId(slot.scope), slot.index));
        }
    });

    // Load modules on mount and whenever triggered
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            match commands::list_modules().await {
                Ok(loaded) => {
                    if store.current_module().get_untracked().is_none() {
                        *store.current_module().write() = loaded.first().map(|m| m.id);
                    }
                    *store.modules().write() = loaded;
                }
                Err(err) => log::warn!("Failed to load modules: {}", err),
            }
        });
    });

    // Load lessons of the selected module
    Effect::new(move |_| {
        let Some(module_id) = store.current_module().get() else { return };
        let coordinator = ctx.coordinator();
        spawn_local(async move {
            if let Err(err) = coordinator.load(ModuleId(module_id)).await {
                log::warn!("Failed to load lessons of module {}: {}", module_id, err);
            }
        });
    });

    view! {
        <div class="app-layout">
            <ModuleSidebar />

            <main class="main-content">
                <ReorderNotice />
                {move || match store.current_module().get() {
                    Some(module_id) => view! {
                        <h1>{move || {
                            store.modules().get().into_iter()
                                .find(|m| m.id == module_id)
                                .map(|m| m.title)
                                .unwrap_or_default()
                        }}</h1>
                        <NewLessonForm module_id=module_id />
                        <OrderedListView module_id=module_id />
                    }.into_any(),
                    None => view! { <p class="empty-hint">"Create a module to start adding lessons."</p> }.into_any(),
                }}
            </main>
        </div>
    }
}
