use std::sync::Arc;

use async_trait::async_trait;
use cache::CacheAsideStore;
use cache::CacheStore;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::task::errors::TaskError;
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Prefix of every task cache key.
pub const TASK_CACHE_PREFIX: &str = "task";

/// Domain service for tasks, reading through the cache.
pub struct TaskService<TR, C>
where
    TR: TaskRepository,
    C: CacheStore,
{
    store: CacheAsideStore<TR, C>,
}

impl<TR, C> TaskService<TR, C>
where
    TR: TaskRepository,
    C: CacheStore,
{
    /// Create a new task service.
    ///
    /// # Arguments
    /// * `repository` - Task persistence implementation
    /// * `cache` - Cache backend placed in front of the repository
    pub fn new(repository: Arc<TR>, cache: Arc<C>) -> Self {
        Self {
            store: CacheAsideStore::new(repository, cache, TASK_CACHE_PREFIX),
        }
    }
}

#[async_trait]
impl<TR, C> TaskServicePort for TaskService<TR, C>
where
    TR: TaskRepository,
    C: CacheStore,
{
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        Ok(self.store.get_one(id).await?)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.get_all().await?)
    }

    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = self.store.create(command).await?;
        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    async fn update_task(
        &self,
        id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        Ok(self.store.update(id, command).await?)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError> {
        self.store.delete(id).await?;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}
