use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::parse_user_id;
use super::UserResponseData;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateAccessCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

/// HTTP request body for an access edit (raw JSON)
///
/// Unknown role names fall back to `user`.
#[derive(Debug, Deserialize)]
pub struct UpdateAccessRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateAccessRequest> for UpdateAccessCommand {
    fn from(req: UpdateAccessRequest) -> Self {
        Self {
            role: req.role.as_deref().map(Role::from_name),
            is_active: req.is_active,
        }
    }
}

pub async fn update_access(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateAccessRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    state
        .user_service
        .update_access(&user_id, req.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
