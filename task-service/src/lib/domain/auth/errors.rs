use thiserror::Error;

use crate::user::errors::UserError;

/// Why a request could not be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    Expired,
    Invalid,
    Inactive,
    Missing,
    Generic,
}

impl UnauthorizedReason {
    pub fn message(&self) -> &'static str {
        match self {
            UnauthorizedReason::Expired => "Access token expired",
            UnauthorizedReason::Invalid => "Invalid access token",
            UnauthorizedReason::Inactive => "User account is inactive",
            UnauthorizedReason::Missing => "Missing bearer token",
            UnauthorizedReason::Generic => "Unauthorized",
        }
    }
}

/// Errors raised by authentication and authorization.
///
/// Messages never include secrets, hashes or token contents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("User no longer exists")]
    UserNotFound,

    #[error("{}", .0.message())]
    Unauthorized(UnauthorizedReason),

    #[error("Insufficient role for this operation")]
    Forbidden,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => AuthError::DuplicateUsername(username),
            UserError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            UserError::NotFound(_) => AuthError::UserNotFound,
            UserError::InvalidUsername(e) => AuthError::InvalidUsername(e.to_string()),
            UserError::InvalidEmail(e) => AuthError::InvalidEmail(e.to_string()),
            UserError::InvalidUserId(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

/// Error for audit sink writes
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Failed to record audit event: {0}")]
    WriteFailed(String),
}
