use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::inbound::http::handlers::ApiError;

pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod update_task;

pub use create_task::create_task;
pub use delete_task::delete_task;
pub use get_task::get_task;
pub use list_tasks::list_tasks;
pub use update_task::update_task;

/// Response body for task operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponseData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponseData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

fn parse_task_id(id: &str) -> Result<TaskId, ApiError> {
    TaskId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}
