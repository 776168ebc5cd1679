//! Module Sidebar Component
//!
//! Module list with lesson counts and a form to add modules.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::use_studio;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ModuleSidebar() -> impl IntoView {
    let ctx = use_studio();
    let store = use_app_store();
    let (new_title, set_new_title) = signal(String::new());

    let create_module = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_title.get();
        if text.trim().is_empty() { return; }
        spawn_local(async move {
            match commands::create_module(&text).await {
                Ok(module) => {
                    set_new_title.set(String::new());
                    *store.current_module().write() = Some(module.id);
                    ctx.reload();
                }
                Err(err) => log::warn!("Failed to create module: {}", err),
            }
        });
    };

    view! {
        <aside class="module-sidebar">
            <h2>"Modules"</h2>
            <ul class="module-list">
                <For
                    each=move || store.modules().get()
                    key=|m| (m.id, m.title.clone(), m.lesson_count)
                    children=move |m| {
                        let id = m.id;
                        let is_current = move || store.current_module().get() == Some(id);
                        view! {
                            <li
                                class="module-entry"
                                class:active=is_current
                                on:click=move |_| *store.current_module().write() = Some(id)
                            >
                                <span class="module-title">{m.title.clone()}</span>
                                <span class="lesson-count">{m.lesson_count}</span>
                            </li>
                        }
                    }
                />
            </ul>
            <form class="new-module-form" on:submit=create_module>
                <input
                    type="text"
                    placeholder="New module..."
                    prop:value=move || new_title.get()
                    on:input=move |ev| {
                        if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                            set_new_title.set(input.value());
                        }
                    }
                />
                <button type="submit">"Add"</button>
            </form>
        </aside>
    }
}
