//! Reorder Notice Component
//!
//! Banner for reorder failures; the list itself has already been restored.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ReorderNotice() -> impl IntoView {
    let store = use_app_store();

    move || {
        store.notice().get().map(|notice| {
            view! {
                <div class="reorder-notice" class:error=notice.is_error>
                    <span>{notice.message}</span>
                    <button class="dismiss-btn" on:click=move |_| *store.notice().write() = None>"×"</button>
                </div>
            }
        })
    }
}
