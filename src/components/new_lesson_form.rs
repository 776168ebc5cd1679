//! New Lesson Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::use_studio;
use crate::models::ModuleId;

/// Appends a lesson to the module, then reloads its list
#[component]
pub fn NewLessonForm(module_id: u32) -> impl IntoView {
    let ctx = use_studio();
    let (title, set_title) = signal(String::new());

    let create_lesson = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() { return; }

        spawn_local(async move {
            match commands::create_lesson(module_id, &text).await {
                Ok(_) => {
                    set_title.set(String::new());
                    if let Err(err) = ctx.coordinator().load(ModuleId(module_id)).await {
                        log::warn!("Reload after create failed: {}", err);
                    }
                    ctx.reload();
                }
                Err(err) => log::warn!("Failed to create lesson: {}", err),
            }
        });
    };

    view! {
        <form class="new-lesson-form" on:submit=create_lesson>
            <input
                type="text"
                placeholder="Add a lesson..."
                prop:value=move || title.get()
                on:input=move |ev| {
                    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                        set_title.set(input.value());
                    }
                }
            />
            <button type="submit">"Add"</button>
        </form>
    }
}
