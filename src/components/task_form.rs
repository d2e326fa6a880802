//! Task Form Component
//!
//! Modal form for creating a task or editing title and description.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::components::{FormField, NoticeBanner, TextAreaField};
use crate::context::AppContext;
use crate::forms::FormState;
use crate::models::{Task, TaskDraft};
use crate::validation::MAX_DESCRIPTION_LEN;

/// What the form is editing
#[derive(Debug, Clone, PartialEq)]
pub enum EditorTarget {
    New,
    Existing(Task),
}

impl EditorTarget {
    fn task_id(&self) -> Option<String> {
        match self {
            EditorTarget::New => None,
            EditorTarget::Existing(task) => Some(task.id.clone()),
        }
    }
}

#[component]
pub fn TaskForm(
    target: EditorTarget,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let initial = match &target {
        EditorTarget::New => TaskDraft::default(),
        EditorTarget::Existing(task) => TaskDraft::from_task(task),
    };
    let heading = match &target {
        EditorTarget::New => "New Task",
        EditorTarget::Existing(_) => "Edit Task",
    };
    let task_id = target.task_id();

    let title = RwSignal::new(initial.title);
    let description = RwSignal::new(initial.description);
    let state = RwSignal::new(FormState::default());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = TaskDraft {
            title: title.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
        };
        if !state.try_update(|s| s.begin(&draft)).unwrap_or(false) {
            return;
        }

        let api = ctx.api();
        let task_id = task_id.clone();
        spawn_local(async move {
            match board::save_task(&api, task_id.as_deref(), &draft).await {
                Ok(_) => {
                    state.try_update(|s| s.succeed("Task saved"));
                    on_saved.run(());
                }
                Err(err) => {
                    state.try_update(|s| s.fail(err.user_message("Failed to save task")));
                }
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <h2>{heading}</h2>
                <NoticeBanner notice=Signal::derive(move || state.with(|s| s.notice().cloned())) />
                <form class="task-form" on:submit=submit>
                    <FormField
                        label="Title"
                        name="title"
                        value=title
                        error=Signal::derive(move || state.with(|s| s.field_error("title")))
                    />
                    <TextAreaField
                        label="Description"
                        name="description"
                        value=description
                        error=Signal::derive(move || state.with(|s| s.field_error("description")))
                        max_len=MAX_DESCRIPTION_LEN
                    />
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="primary-btn" disabled=move || state.with(FormState::is_busy)>
                            {move || if state.with(FormState::is_busy) { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
