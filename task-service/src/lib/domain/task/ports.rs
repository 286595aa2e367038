use async_trait::async_trait;
use cache::ResourceStore;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::task::errors::TaskError;

/// Port for task operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Retrieve a task by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError>;

    /// Retrieve every task.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError>;

    /// Create a task.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError>;

    /// Apply a partial update to a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_task(&self, id: &TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks, expressed as a cacheable resource store.
pub trait TaskRepository:
    ResourceStore<Id = TaskId, Resource = Task, Draft = CreateTaskCommand, Error = TaskError>
{
}

impl<T> TaskRepository for T where
    T: ResourceStore<Id = TaskId, Resource = Task, Draft = CreateTaskCommand, Error = TaskError>
{
}
