use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use super::parse_task_id;
use super::TaskResponseData;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;

/// HTTP request body for updating a task (raw JSON)
///
/// An explicit `"description": null` clears the description.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        let title = self.title.map(TaskTitle::new).transpose()?;

        Ok(UpdateTaskCommand {
            title,
            description: self.description,
            completed: self.completed,
        })
    }
}

/// Marks a field as present, including when its value is null
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let task_id = parse_task_id(&task_id)?;
    let command = req.try_into_command()?;

    state
        .task_service
        .update_task(&task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
