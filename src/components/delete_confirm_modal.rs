//! Delete Confirm Modal Component
//!
//! Confirmation dialog shown before a task is deleted.

use leptos::prelude::*;

/// Modal delete confirmation
///
/// # Arguments
/// * `task_title` - Title of the task shown in the prompt
/// * `busy` - Disables both actions while the delete request runs
/// * `on_confirm` - Callback to execute when user confirms deletion
/// * `on_cancel` - Callback to dismiss the dialog
#[component]
pub fn DeleteConfirmModal(
    #[prop(into)] task_title: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop" on:click=move |_| if !busy.get_untracked() { on_cancel.run(()) }>
            <div class="modal delete-confirm" role="alertdialog" on:click=|ev| ev.stop_propagation()>
                <h2>"Delete task?"</h2>
                <p class="delete-confirm-text">
                    "\"" {task_title} "\" will be removed permanently."
                </p>
                <div class="modal-actions">
                    <button
                        class="cancel-btn"
                        disabled=move || busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_cancel.run(());
                        }
                    >
                        "Cancel"
                    </button>
                    <button
                        class="confirm-btn danger"
                        disabled=move || busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_confirm.run(());
                        }
                    >
                        {move || if busy.get() { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
