use async_trait::async_trait;
use auth::IssuedToken;
use auth::TokenPair;

use crate::domain::auth::errors::AuditError;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuditEvent;
use crate::domain::auth::models::AuditRecord;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::RequiredRoles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for credential-based authentication.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check a username/password pair.
    ///
    /// # Returns
    /// The matching user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Internal` - Store lookup failed
    async fn validate_credentials(&self, username: &str, password: &str)
        -> Result<User, AuthError>;

    /// Issue an access and refresh token for a validated user.
    ///
    /// # Errors
    /// * `Internal` - Token generation failed
    async fn login(&self, user: &User) -> Result<TokenPair, AuthError>;

    /// Create a new active user with role `User`.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `DuplicateEmail` - Email is already registered
    /// * `Internal` - Hashing or store write failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token failed verification for any reason
    /// * `UserNotFound` - Token subject no longer exists
    /// * `Internal` - Store lookup or token generation failed
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AuthError>;

    /// Record an audit event. Best-effort: the record is written on a detached
    /// task, so the call returns without waiting on the sink and sink failures
    /// are only logged.
    async fn log_audit_event(&self, event: AuditEvent, user_id: Option<UserId>);
}

/// Port for per-request identity and role checks.
#[async_trait]
pub trait AuthorizationPort: Send + Sync + 'static {
    /// Resolve an access token to an active user.
    ///
    /// # Errors
    /// * `Unauthorized(Expired)` - Token has expired
    /// * `Unauthorized(Invalid)` - Token is malformed, forged or has a bad subject
    /// * `Unauthorized(Inactive)` - User is deactivated
    /// * `Unauthorized(Generic)` - Any other verification failure, or user is gone
    /// * `Internal` - Store lookup failed
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Enforce a role requirement on an authenticated user.
    ///
    /// # Errors
    /// * `Forbidden` - User's role is not in a non-empty requirement
    fn authorize(&self, user: &User, required: &RequiredRoles) -> Result<(), AuthError>;
}

/// Append-only destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}
