use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_task_id;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task_id = parse_task_id(&task_id)?;

    state
        .task_service
        .delete_task(&task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
