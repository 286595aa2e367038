use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::user::errors::UserError;

pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_access;
pub mod update_user;

pub use delete_user::delete_user;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_access::update_access;
pub use update_user::update_user;

/// Response body for user operations. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    UserId::from_string(id).map_err(|e| ApiError::from(UserError::from(e)))
}
