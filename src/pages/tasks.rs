//! Task Board Screen
//!
//! Owns the board mirror and the create / edit / delete dialogs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board::{self, Board};
use crate::components::{DeleteConfirmModal, EditorTarget, LoadingSpinner, TaskBoard, TaskForm};
use crate::context::AppContext;
use crate::models::Task;

#[component]
pub fn TasksPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let board = RwSignal::new(Board::default());
    let (loaded, set_loaded) = signal(false);
    let editor = RwSignal::new(None::<EditorTarget>);
    let deleting = RwSignal::new(None::<Task>);
    let (delete_busy, set_delete_busy) = signal(false);

    let reload = move || {
        let api = ctx.api();
        spawn_local(async move {
            if let Err(err) = board::refresh(&api, &board).await {
                tracing::warn!(error = %err, "[TASKS] load failed");
                board.try_update(|b| b.set_notice(err.user_message("Failed to load tasks")));
            }
            set_loaded.try_set(true);
        });
    };

    // Initial load
    Effect::new(move |_| reload());

    let on_edit = Callback::new(move |task: Task| editor.set(Some(EditorTarget::Existing(task))));
    let on_delete = Callback::new(move |task: Task| deleting.set(Some(task)));
    let on_saved = Callback::new(move |_: ()| {
        editor.set(None);
        reload();
    });
    let on_close = Callback::new(move |_: ()| editor.set(None));

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(task) = deleting.get_untracked() else {
            return;
        };
        set_delete_busy.set(true);
        let api = ctx.api();
        spawn_local(async move {
            // Failures are reported on the board banner
            let _ = board::remove_task(&api, &board, &task.id).await;
            set_delete_busy.try_set(false);
            deleting.try_set(None);
        });
    });
    let cancel_delete = Callback::new(move |_: ()| deleting.set(None));

    view! {
        <div class="tasks-page">
            <header class="tasks-header">
                <h1>"My Tasks"</h1>
                <button class="primary-btn" on:click=move |_| editor.set(Some(EditorTarget::New))>
                    "+ New Task"
                </button>
            </header>
            <Show when=move || loaded.get() fallback=|| view! { <LoadingSpinner label="Loading tasks..." /> }>
                <TaskBoard board=board on_edit=on_edit on_delete=on_delete />
            </Show>
            {move || editor.get().map(|target| view! {
                <TaskForm target=target on_saved=on_saved on_close=on_close />
            })}
            {move || deleting.get().map(|task| view! {
                <DeleteConfirmModal
                    task_title=task.title
                    busy=delete_busy
                    on_confirm=confirm_delete
                    on_cancel=cancel_delete
                />
            })}
        </div>
    }
}
