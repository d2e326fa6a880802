//! In-memory task gateway for board tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::{Ack, ApiError, ApiResult, TaskGateway};
use crate::board::Board;
use crate::models::{Task, TaskDraft, TaskStatus};

#[derive(Default)]
pub(crate) struct FakeTaskApi {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<u32>,
    fail_status_updates: Cell<bool>,
    fail_lists: Cell<bool>,
    status_calls: Cell<u32>,
    list_calls: Cell<u32>,
    board: RefCell<Option<Rc<RefCell<Board>>>>,
    observed: RefCell<Vec<Option<TaskStatus>>>,
}

impl FakeTaskApi {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Default::default()
        }
    }

    /// Record the board's view of each task when its status update arrives
    pub fn watch_board(&self, board: Rc<RefCell<Board>>) {
        *self.board.borrow_mut() = Some(board);
    }

    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.set(fail);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.set(fail);
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn observed_statuses(&self) -> Vec<Option<TaskStatus>> {
        self.observed.borrow().clone()
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.get()
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.get()
    }

    fn not_found() -> ApiError {
        ApiError::Server {
            status: 404,
            message: Some("Task not found".to_string()),
        }
    }
}

#[async_trait(?Send)]
impl TaskGateway for FakeTaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_lists.get() {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Ack> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let description = Some(draft.description.clone()).filter(|d| !d.is_empty());
        self.tasks.borrow_mut().push(Task {
            id: format!("task-{}", id),
            title: draft.title.clone(),
            description,
            status: TaskStatus::Pending,
        });
        Ok(Ack { message: Some("Task created successfully".to_string()) })
    }

    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> ApiResult<Ack> {
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks.iter_mut().find(|t| t.id == task_id).ok_or_else(Self::not_found)?;
        task.title = draft.title.clone();
        task.description = Some(draft.description.clone()).filter(|d| !d.is_empty());
        Ok(Ack::default())
    }

    async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> ApiResult<Ack> {
        self.status_calls.set(self.status_calls.get() + 1);

        if let Some(board) = self.board.borrow().as_ref() {
            let seen = board
                .borrow()
                .tasks()
                .iter()
                .find(|t| t.id == task_id)
                .map(|t| t.status);
            self.observed.borrow_mut().push(seen);
        }

        if self.fail_status_updates.get() {
            return Err(ApiError::Server {
                status: 500,
                message: Some("database unavailable".to_string()),
            });
        }

        let mut tasks = self.tasks.borrow_mut();
        let task = tasks.iter_mut().find(|t| t.id == task_id).ok_or_else(Self::not_found)?;
        task.status = status;
        Ok(Ack::default())
    }

    async fn delete_task(&self, task_id: &str) -> ApiResult<Ack> {
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Err(Self::not_found());
        }
        Ok(Ack::default())
    }
}
