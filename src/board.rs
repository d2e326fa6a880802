//! Task Board State
//!
//! Local mirror of the server's task list plus the optimistic status move.
//! A move is applied to the mirror synchronously, persisted asynchronously,
//! and undone from a whole-board snapshot if the server rejects it.
//! Only one move may be in flight per board so a rollback can never
//! discard another move's optimistic change.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use thiserror::Error;

use crate::api::{Ack, ApiError, ApiResult, TaskGateway};
use crate::models::{Task, TaskDraft, TaskStatus};

pub const STATUS_UPDATE_FAILED: &str = "Failed to update task status. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete task. Please try again.";

/// A drop gesture: card, the column it came from, the column it landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMove {
    pub task_id: String,
    pub source: String,
    /// `None` when released outside every column
    pub destination: Option<String>,
}

/// Why a move was refused before touching the mirror
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("Tasks can only be moved to Pending, Completed, or Done columns")]
    UnknownColumn,

    #[error("Task is already in the same column.")]
    SameColumn,

    #[error("Another task move is still being saved. Please wait.")]
    MoveInFlight,

    #[error("Task not found on the board.")]
    UnknownTask,

    #[error("The board is no longer displayed.")]
    Detached,
}

/// Accepted move, as sent to the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Server accepted; mirror refreshed (or kept if the refetch failed)
    Saved,
    /// Server refused; mirror restored from the snapshot
    RolledBack(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
struct PendingMove {
    change: StatusChange,
    snapshot: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    tasks: Vec<Task>,
    notice: Option<String>,
    in_flight: Option<PendingMove>,
}

impl Board {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, ..Default::default() }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks of one column, in server order
    pub fn column(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks.iter().filter(|t| t.status == status).cloned().collect()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    /// Banner message, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// A status update is waiting for the server
    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replace the mirror with a fresh server list.
    ///
    /// An in-flight move keeps its optimistic status on top of the new list,
    /// and a later rollback restores the list as the server sent it.
    pub fn replace_tasks(&mut self, mut tasks: Vec<Task>) {
        if let Some(pending) = &mut self.in_flight {
            pending.snapshot = tasks.clone();
            if let Some(task) = tasks.iter_mut().find(|t| t.id == pending.change.task_id) {
                task.status = pending.change.to;
            }
        }
        self.tasks = tasks;
    }

    /// Check a drop and, if accepted, apply it to the mirror immediately.
    ///
    /// A rejection leaves the tasks untouched and sets the banner.
    pub fn begin_move(&mut self, mv: &ColumnMove) -> Result<StatusChange, MoveRejected> {
        let result = self.apply_move(mv);
        if let Err(rejected) = &result {
            self.notice = Some(rejected.to_string());
        }
        result
    }

    fn apply_move(&mut self, mv: &ColumnMove) -> Result<StatusChange, MoveRejected> {
        let destination_id = mv.destination.as_deref().ok_or(MoveRejected::UnknownColumn)?;
        let destination: TaskStatus = destination_id
            .parse()
            .map_err(|_| MoveRejected::UnknownColumn)?;

        if mv.source == destination_id {
            return Err(MoveRejected::SameColumn);
        }
        if self.in_flight.is_some() {
            return Err(MoveRejected::MoveInFlight);
        }

        let index = self
            .tasks
            .iter()
            .position(|t| t.id == mv.task_id)
            .ok_or(MoveRejected::UnknownTask)?;

        let snapshot = self.tasks.clone();
        let from = self.tasks[index].status;
        self.tasks[index].status = destination;

        let change = StatusChange {
            task_id: mv.task_id.clone(),
            from,
            to: destination,
        };
        self.in_flight = Some(PendingMove { change: change.clone(), snapshot });
        Ok(change)
    }

    /// Server accepted the move
    pub fn settle_success(&mut self, refreshed: Option<Vec<Task>>) {
        self.in_flight = None;
        if let Some(tasks) = refreshed {
            self.tasks = tasks;
        }
        self.notice = None;
    }

    /// Server refused the move: restore the pre-move mirror
    pub fn settle_failure(&mut self) {
        if let Some(pending) = self.in_flight.take() {
            self.tasks = pending.snapshot;
        }
        self.notice = Some(STATUS_UPDATE_FAILED.to_string());
    }
}

/// Shared, mutable access to a board from event handlers and async tasks
pub trait BoardCell {
    /// Run `f` on the board; `None` once the board is gone
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R>;
}

impl BoardCell for RwSignal<Board> {
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl BoardCell for Rc<RefCell<Board>> {
    fn with_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Synchronous half of a move: validate and update the mirror
pub fn begin_move<B: BoardCell>(board: &B, mv: &ColumnMove) -> Result<StatusChange, MoveRejected> {
    board
        .with_board(|b| b.begin_move(mv))
        .unwrap_or(Err(MoveRejected::Detached))
}

/// Asynchronous half of a move: persist, then refetch or roll back
pub async fn persist_move<G, B>(gateway: &G, board: &B, change: StatusChange) -> MoveOutcome
where
    G: TaskGateway + ?Sized,
    B: BoardCell,
{
    match gateway.update_task_status(&change.task_id, change.to).await {
        Ok(_) => {
            let refreshed = match gateway.list_tasks().await {
                Ok(tasks) => Some(tasks),
                Err(err) => {
                    tracing::warn!(error = %err, "[BOARD] refetch after move failed, keeping local mirror");
                    None
                }
            };
            board.with_board(|b| b.settle_success(refreshed));
            tracing::info!(task_id = %change.task_id, from = %change.from, to = %change.to, "[BOARD] move saved");
            MoveOutcome::Saved
        }
        Err(err) => {
            tracing::warn!(task_id = %change.task_id, error = %err, "[BOARD] move rejected, rolling back");
            board.with_board(Board::settle_failure);
            MoveOutcome::RolledBack(err)
        }
    }
}

/// Full move; the mirror is updated before the first await
pub async fn move_task<G, B>(gateway: &G, board: &B, mv: ColumnMove) -> Result<MoveOutcome, MoveRejected>
where
    G: TaskGateway + ?Sized,
    B: BoardCell,
{
    let change = begin_move(board, &mv)?;
    Ok(persist_move(gateway, board, change).await)
}

/// Reload the mirror from the server
pub async fn refresh<G, B>(gateway: &G, board: &B) -> ApiResult<()>
where
    G: TaskGateway + ?Sized,
    B: BoardCell,
{
    let tasks = gateway.list_tasks().await?;
    board.with_board(|b| b.replace_tasks(tasks));
    Ok(())
}

/// Create a task, or update it when `editing` names one
pub async fn save_task<G>(gateway: &G, editing: Option<&str>, draft: &TaskDraft) -> ApiResult<Ack>
where
    G: TaskGateway + ?Sized,
{
    match editing {
        Some(task_id) => gateway.update_task(task_id, draft).await,
        None => gateway.create_task(draft).await,
    }
}

/// Delete a task and refresh; failures land in the banner
pub async fn remove_task<G, B>(gateway: &G, board: &B, task_id: &str) -> ApiResult<()>
where
    G: TaskGateway + ?Sized,
    B: BoardCell,
{
    let deleted = match gateway.delete_task(task_id).await {
        Ok(_) => refresh(gateway, board).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &deleted {
        tracing::warn!(task_id, error = %err, "[BOARD] delete failed");
        board.with_board(|b| b.set_notice(DELETE_FAILED));
    }
    deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTaskApi;

    fn make_task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            status,
        }
    }

    fn seed() -> Vec<Task> {
        vec![
            make_task("a", TaskStatus::Pending),
            make_task("b", TaskStatus::Completed),
            make_task("c", TaskStatus::Done),
        ]
    }

    fn drop_on(task_id: &str, source: &str, destination: Option<&str>) -> ColumnMove {
        ColumnMove {
            task_id: task_id.to_string(),
            source: source.to_string(),
            destination: destination.map(str::to_string),
        }
    }

    #[test]
    fn test_unknown_destination_is_rejected() {
        for destination in [None, Some("archived"), Some(""), Some("Pending")] {
            let mut board = Board::new(seed());
            let result = board.begin_move(&drop_on("a", "pending", destination));

            assert_eq!(result, Err(MoveRejected::UnknownColumn));
            assert_eq!(board.tasks(), seed().as_slice());
            assert_eq!(
                board.notice(),
                Some("Tasks can only be moved to Pending, Completed, or Done columns")
            );
            assert!(!board.is_saving());
        }
    }

    #[test]
    fn test_same_column_is_a_no_op() {
        let mut board = Board::new(seed());
        let result = board.begin_move(&drop_on("b", "completed", Some("completed")));

        assert_eq!(result, Err(MoveRejected::SameColumn));
        assert_eq!(board.tasks(), seed().as_slice());
        assert_eq!(board.notice(), Some("Task is already in the same column."));
    }

    #[test]
    fn test_accepted_move_updates_mirror_synchronously() {
        let mut board = Board::new(seed());
        let change = board.begin_move(&drop_on("a", "pending", Some("done"))).unwrap();

        assert_eq!(change.from, TaskStatus::Pending);
        assert_eq!(change.to, TaskStatus::Done);
        assert_eq!(board.count(TaskStatus::Done), 2);
        assert_eq!(board.count(TaskStatus::Pending), 0);
        assert!(board.is_saving());
    }

    #[test]
    fn test_second_move_waits_for_the_first() {
        let mut board = Board::new(seed());
        board.begin_move(&drop_on("a", "pending", Some("done"))).unwrap();
        let after_first = board.tasks().to_vec();

        let second = board.begin_move(&drop_on("b", "completed", Some("pending")));

        assert_eq!(second, Err(MoveRejected::MoveInFlight));
        assert_eq!(board.tasks(), after_first.as_slice());

        board.settle_failure();
        assert_eq!(board.tasks(), seed().as_slice());
    }

    #[test]
    fn test_missing_task_is_rejected() {
        let mut board = Board::new(seed());
        let result = board.begin_move(&drop_on("zzz", "pending", Some("done")));
        assert_eq!(result, Err(MoveRejected::UnknownTask));
        assert!(!board.is_saving());
    }

    #[test]
    fn test_refresh_during_move_keeps_optimistic_status() {
        let mut board = Board::new(seed());
        board.begin_move(&drop_on("a", "pending", Some("completed"))).unwrap();

        let mut fresh = seed();
        fresh.push(make_task("d", TaskStatus::Pending));
        board.replace_tasks(fresh);

        assert_eq!(board.tasks()[0].status, TaskStatus::Completed);
        assert_eq!(board.tasks().len(), 4);
    }

    #[test]
    fn test_rollback_keeps_tasks_from_refresh_during_move() {
        let mut board = Board::new(vec![make_task("a", TaskStatus::Pending)]);
        board.begin_move(&drop_on("a", "pending", Some("done"))).unwrap();

        let fresh = vec![
            make_task("a", TaskStatus::Pending),
            make_task("new", TaskStatus::Pending),
        ];
        board.replace_tasks(fresh.clone());
        board.settle_failure();

        assert_eq!(board.tasks(), fresh.as_slice());
        assert_eq!(board.notice(), Some(STATUS_UPDATE_FAILED));
        assert!(!board.is_saving());
    }

    #[tokio::test]
    async fn test_successful_move_is_visible_before_the_request_resolves() {
        let board = Rc::new(RefCell::new(Board::new(seed())));
        let api = FakeTaskApi::with_tasks(seed());
        api.watch_board(board.clone());

        let outcome = move_task(&api, &board, drop_on("a", "pending", Some("done"))).await;

        assert_eq!(outcome, Ok(MoveOutcome::Saved));
        assert_eq!(api.observed_statuses(), vec![Some(TaskStatus::Done)]);
        assert_eq!(board.borrow().tasks(), api.snapshot().as_slice());
        assert_eq!(board.borrow().tasks()[0].status, TaskStatus::Done);
        assert_eq!(board.borrow().notice(), None);
        assert!(!board.borrow().is_saving());
    }

    #[tokio::test]
    async fn test_failed_move_restores_the_snapshot() {
        let board = Rc::new(RefCell::new(Board::new(seed())));
        let api = FakeTaskApi::with_tasks(seed());
        api.fail_status_updates(true);
        let before = board.borrow().tasks().to_vec();

        let outcome = move_task(&api, &board, drop_on("c", "done", Some("pending"))).await;

        assert!(matches!(outcome, Ok(MoveOutcome::RolledBack(ApiError::Server { status: 500, .. }))));
        assert_eq!(board.borrow().tasks(), before.as_slice());
        assert_eq!(board.borrow().notice(), Some(STATUS_UPDATE_FAILED));
        assert!(!board.borrow().is_saving());
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_move_sends_nothing() {
        let board = Rc::new(RefCell::new(Board::new(seed())));
        let api = FakeTaskApi::with_tasks(seed());

        let outcome = move_task(&api, &board, drop_on("a", "pending", Some("pending"))).await;

        assert_eq!(outcome, Err(MoveRejected::SameColumn));
        assert_eq!(api.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_saved_move_survives_a_failed_refetch() {
        let board = Rc::new(RefCell::new(Board::new(seed())));
        let api = FakeTaskApi::with_tasks(seed());
        api.fail_lists(true);

        let outcome = move_task(&api, &board, drop_on("b", "completed", Some("done"))).await;

        assert_eq!(outcome, Ok(MoveOutcome::Saved));
        assert_eq!(board.borrow().tasks()[1].status, TaskStatus::Done);
        assert!(!board.borrow().is_saving());
    }

    #[tokio::test]
    async fn test_created_task_is_listed_once_as_pending() {
        let board = Rc::new(RefCell::new(Board::default()));
        let api = FakeTaskApi::with_tasks(seed());
        let draft = TaskDraft {
            title: "Ship release".to_string(),
            description: "tag and publish".to_string(),
        };

        save_task(&api, None, &draft).await.unwrap();
        refresh(&api, &board).await.unwrap();

        let board = board.borrow();
        let created: Vec<_> = board.tasks().iter().filter(|t| t.title == "Ship release").collect();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].description.as_deref(), Some("tag and publish"));
        assert_eq!(created[0].status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_edit_updates_title_in_place() {
        let board = Rc::new(RefCell::new(Board::default()));
        let api = FakeTaskApi::with_tasks(seed());
        let draft = TaskDraft {
            title: "Renamed".to_string(),
            description: String::new(),
        };

        save_task(&api, Some("b"), &draft).await.unwrap();
        refresh(&api, &board).await.unwrap();

        assert_eq!(board.borrow().tasks().len(), 3);
        assert_eq!(board.borrow().tasks()[1].title, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_failure_sets_banner() {
        let board = Rc::new(RefCell::new(Board::new(seed())));
        let api = FakeTaskApi::with_tasks(seed());

        assert!(remove_task(&api, &board, "missing").await.is_err());
        assert_eq!(board.borrow().notice(), Some(DELETE_FAILED));

        remove_task(&api, &board, "a").await.unwrap();
        assert_eq!(board.borrow().tasks().len(), 2);
    }
}
