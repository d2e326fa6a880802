//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_modal;
mod form_field;
mod loading_spinner;
mod navbar;
mod notice_banner;
mod task_board;
mod task_form;

pub use delete_confirm_modal::DeleteConfirmModal;
pub use form_field::{FormField, TextAreaField};
pub use loading_spinner::LoadingSpinner;
pub use navbar::{NavLink, Navbar};
pub use notice_banner::NoticeBanner;
pub use task_board::TaskBoard;
pub use task_form::{EditorTarget, TaskForm};
