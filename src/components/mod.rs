//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod lesson_list;
mod lesson_row;
mod module_sidebar;
mod new_lesson_form;
mod reorder_notice;

pub use delete_confirm_button::DeleteConfirmButton;
pub use lesson_list::OrderedListView;
pub use lesson_row::LessonRow;
pub use module_sidebar::ModuleSidebar;
pub use new_lesson_form::NewLessonForm;
pub use reorder_notice::ReorderNotice;
