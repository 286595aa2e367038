use axum::http::StatusCode;

use super::ApiSuccess;

pub async fn health_check() -> ApiSuccess<String> {
    ApiSuccess::new(StatusCode::OK, "The application is running!".to_string())
}
