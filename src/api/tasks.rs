//! Task Endpoints
//!
//! The task API behind a trait so the board can run against a fake.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{path_segment, Ack, ApiClient, ApiResult, CacheTag};
use crate::models::{Task, TaskDraft, TaskStatus};

/// Task operations used by the board and the task form
#[async_trait(?Send)]
pub trait TaskGateway {
    /// Current task list
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Ack>;

    /// Replace title and description
    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> ApiResult<Ack>;

    async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> ApiResult<Ack>;

    async fn delete_task(&self, task_id: &str) -> ApiResult<Ack>;
}

#[async_trait(?Send)]
impl TaskGateway for ApiClient {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let cached = self.with_cache(|cache| {
            (cache.tasks().map(<[Task]>::to_vec), cache.generation(CacheTag::Tasks))
        });
        let generation = match cached {
            Some((Some(tasks), _)) => return Ok(tasks),
            Some((None, generation)) => generation,
            None => 0,
        };

        let request = self.http.get(self.config.tasks_url(""));
        let tasks = self.send::<Vec<Task>>(request).await?.data.unwrap_or_default();
        tracing::debug!(count = tasks.len(), "[TASKS] fetched");

        if self.with_cache(|cache| cache.store_tasks(tasks.clone(), generation)) == Some(false) {
            tracing::debug!("[TASKS] list outdated by a mutation, not cached");
        }
        Ok(tasks)
    }

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Ack> {
        let request = self.http.post(self.config.tasks_url("")).json(draft);
        let envelope = self.send::<Value>(request).await?;
        self.invalidate(CacheTag::Tasks);
        Ok(envelope.into())
    }

    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> ApiResult<Ack> {
        let request = self
            .http
            .put(self.config.tasks_url(&path_segment(task_id)))
            .json(draft);
        let envelope = self.send::<Value>(request).await?;
        self.invalidate(CacheTag::Tasks);
        Ok(envelope.into())
    }

    async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> ApiResult<Ack> {
        let url = self.config.tasks_url(&format!("{}/status", path_segment(task_id)));
        let request = self.http.patch(url).json(&json!({ "status": status }));
        // Invalidate on failure too: the server state is unknown afterwards
        let result = self.send::<Value>(request).await;
        self.invalidate(CacheTag::Tasks);
        Ok(result?.into())
    }

    async fn delete_task(&self, task_id: &str) -> ApiResult<Ack> {
        let request = self.http.delete(self.config.tasks_url(&path_segment(task_id)));
        let envelope = self.send::<Value>(request).await?;
        self.invalidate(CacheTag::Tasks);
        Ok(envelope.into())
    }
}
