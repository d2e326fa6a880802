//! Task Board Component
//!
//! Three status columns with mouse-driven drag and drop between them.
//! Drops go through the optimistic move in `crate::board`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::board::{self, Board, ColumnMove};
use crate::components::NoticeBanner;
use crate::context::AppContext;
use crate::forms::Notice;
use crate::models::{Task, TaskStatus};

/// Card being dragged and the column it started in
#[derive(Debug, Clone, PartialEq)]
pub struct DragCard {
    pub task_id: String,
    pub column_id: String,
}

type BoardDnd = DndSignals<DragCard, String>;

#[component]
fn TaskCard(
    task: Task,
    dnd: BoardDnd,
    on_edit: Callback<Task>,
    on_delete: Callback<Task>,
) -> impl IntoView {
    let card = DragCard {
        task_id: task.id.clone(),
        column_id: task.status.as_str().to_string(),
    };
    let task_id = task.id.clone();
    let is_dragging = move || dnd.dragging_read.with(|d| d.as_ref().is_some_and(|c| c.task_id == task_id));

    let edit_task = task.clone();
    let delete_task = task.clone();

    view! {
        <article
            class=move || if is_dragging() { "task-card dragging" } else { "task-card" }
            on:mousedown=make_on_mousedown(dnd, card)
        >
            <h3 class="task-title">{task.title.clone()}</h3>
            {task.description.clone().filter(|d| !d.is_empty()).map(|d| view! {
                <p class="task-description">{d}</p>
            })}
            <div class="task-actions">
                <button
                    class="task-edit-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        if !dnd.drag_just_ended_read.get_untracked() {
                            on_edit.run(edit_task.clone());
                        }
                    }
                >
                    "Edit"
                </button>
                <button
                    class="task-delete-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        if !dnd.drag_just_ended_read.get_untracked() {
                            on_delete.run(delete_task.clone());
                        }
                    }
                >
                    "Delete"
                </button>
            </div>
        </article>
    }
}

#[component]
fn BoardColumn(
    status: TaskStatus,
    board: RwSignal<Board>,
    dnd: BoardDnd,
    on_edit: Callback<Task>,
    on_delete: Callback<Task>,
) -> impl IntoView {
    let column_id = status.as_str().to_string();
    let is_target = {
        let column_id = column_id.clone();
        move || dnd.drop_target_read.with(|t| t.as_deref() == Some(column_id.as_str()))
    };

    view! {
        <section
            class=move || if is_target() { "board-column drop-target" } else { "board-column" }
            data-column=column_id.clone()
            on:mouseenter=make_on_target_mouseenter(dnd, column_id)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <header class="column-header">
                <h2>{status.title()}</h2>
                <span class="column-count">{move || board.with(|b| b.count(status))}</span>
            </header>
            <div class="column-cards">
                <For
                    each=move || board.with(|b| b.column(status))
                    key=|task| (task.id.clone(), task.title.clone(), task.description.clone(), task.status)
                    let:task
                >
                    <TaskCard task=task dnd=dnd on_edit=on_edit on_delete=on_delete />
                </For>
            </div>
        </section>
    }
}

/// Kanban board over the shared mirror
#[component]
pub fn TaskBoard(
    board: RwSignal<Board>,
    on_edit: Callback<Task>,
    on_delete: Callback<Task>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let dnd: BoardDnd = create_dnd_signals();

    let api = ctx.api();
    let listeners = bind_global_mouseup(dnd, move |card: DragCard, target: Option<String>| {
        let mv = ColumnMove {
            task_id: card.task_id,
            source: card.column_id,
            destination: target,
        };
        let change = match board::begin_move(&board, &mv) {
            Ok(change) => change,
            Err(rejected) => {
                tracing::debug!(task_id = %mv.task_id, reason = %rejected, "[BOARD] drop ignored");
                return;
            }
        };
        let api = api.clone();
        spawn_local(async move {
            board::persist_move(&api, &board, change).await;
        });
    });

    let listeners = StoredValue::new_local(Some(listeners));
    on_cleanup(move || {
        if let Some(listeners) = listeners.try_update_value(Option::take).flatten() {
            listeners.remove();
        }
    });

    let notice = Signal::derive(move || board.with(|b| b.notice().map(Notice::error)));

    view! {
        <div class="task-board-wrapper">
            <NoticeBanner
                notice=notice
                on_dismiss=Callback::new(move |_| board.update(Board::clear_notice))
            />
            <Show when=move || board.with(Board::is_saving)>
                <p class="board-saving">"Saving..."</p>
            </Show>
            <div class="task-board">
                {TaskStatus::ALL
                    .into_iter()
                    .map(|status| view! {
                        <BoardColumn
                            status=status
                            board=board
                            dnd=dnd
                            on_edit=on_edit
                            on_delete=on_delete
                        />
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
