use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::task::errors::TaskError;
use crate::user::errors::UserError;

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Unauthorized(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::DuplicateUsername(_) | AuthError::DuplicateEmail(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidRefreshToken | AuthError::UserNotFound | AuthError::Forbidden => {
                ApiError::Forbidden(err.to_string())
            }
            AuthError::InvalidUsername(_) | AuthError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::InvalidTaskId(_) => ApiError::BadRequest(err.to_string()),
            TaskError::InvalidTitle(_) => ApiError::UnprocessableEntity(err.to_string()),
            TaskError::DatabaseError(_) | TaskError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::errors::UnauthorizedReason;

    #[test]
    fn test_auth_error_status_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert_eq!(
            ApiError::from(AuthError::Unauthorized(UnauthorizedReason::Expired)),
            ApiError::Unauthorized("Access token expired".to_string())
        );
        assert!(matches!(
            ApiError::from(AuthError::InvalidRefreshToken),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::DuplicateEmail("a@b.c".to_string())),
            ApiError::Conflict(_)
        ));
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::from(UserError::DatabaseError(
            "password_hash column missing".to_string(),
        ));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["message"], "Internal server error");
        assert!(!String::from_utf8_lossy(&bytes).contains("password_hash"));
    }

    #[test]
    fn test_task_error_status_mapping() {
        assert!(matches!(
            ApiError::from(TaskError::NotFound("1".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(TaskError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }
}
