use axum::extract::State;
use axum::http::StatusCode;

use super::TaskResponseData;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TaskResponseData>>, ApiError> {
    state
        .task_service
        .list_tasks()
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(
                StatusCode::OK,
                tasks.iter().map(TaskResponseData::from).collect(),
            )
        })
}
