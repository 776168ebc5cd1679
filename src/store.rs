//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Lesson lists are
//! not stored here: the reorder coordinator owns them and `reorder_tick`
//! tells views when to re-read.

use leptos::prelude::*;
use reactive_stores::Store;

use lesson_order::{ErrorKind, OrderError};

use crate::models::ModuleSummary;

/// How long a notice stays on screen
const NOTICE_MS: u32 = 4000;

/// User-facing message about a reorder outcome
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All modules with lesson counts
    pub modules: Vec<ModuleSummary>,
    /// Module whose lessons are shown
    pub current_module: Option<u32>,
    /// Banner shown after a failed reorder
    pub notice: Option<Notice>,
    /// Bumped on every coordinator event (increment to trigger re-render)
    pub reorder_tick: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_bump_reorder_tick(store: &AppStore) {
    *store.reorder_tick().write() += 1;
}

/// Show a notice and clear it after a few seconds
pub fn store_show_notice(store: &AppStore, notice: Notice) {
    *store.notice().write() = Some(notice.clone());
    let store = *store;
    gloo_timers::callback::Timeout::new(NOTICE_MS, move || {
        // A newer notice keeps its own timer
        if store.notice().get_untracked().as_ref() == Some(&notice) {
            *store.notice().write() = None;
        }
    })
    .forget();
}

/// Notice for a failed reorder; local rejections stay silent
pub fn notice_for(err: &OrderError) -> Option<Notice> {
    let message = match err.kind() {
        ErrorKind::Local => return None,
        ErrorKind::Transport => "Could not save the new order. Showing the saved order.",
        ErrorKind::Validation => "The server rejected the new order. Showing the saved order.",
        ErrorKind::Conflict => "This module was changed elsewhere. Showing the latest order.",
    };
    Some(Notice {
        message: message.to_string(),
        is_error: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_order::ModuleId;
    use std::time::Duration;

    #[test]
    fn test_notice_for_kinds() {
        assert!(notice_for(&OrderError::Busy(ModuleId(1))).is_none());
        assert!(notice_for(&OrderError::StaleSnapshot(ModuleId(1))).is_none());

        let timeout = notice_for(&OrderError::Timeout(Duration::from_secs(10))).unwrap();
        let transport = notice_for(&OrderError::Transport("offline".into())).unwrap();
        assert_eq!(timeout, transport);

        let conflict = notice_for(&OrderError::Conflict("stale".into())).unwrap();
        assert!(conflict.message.contains("changed elsewhere"));
    }
}
