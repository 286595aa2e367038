use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Security-relevant occurrences recorded by the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Registered,
    LoginSucceeded,
    LoginFailed,
    TokenRefreshed,
    RefreshRejected,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEvent::Registered => "registered",
            AuditEvent::LoginSucceeded => "login_succeeded",
            AuditEvent::LoginFailed => "login_failed",
            AuditEvent::TokenRefreshed => "token_refreshed",
            AuditEvent::RefreshRejected => "refresh_rejected",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub event: AuditEvent,
    pub user_id: Option<UserId>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(event: AuditEvent, user_id: Option<UserId>) -> Self {
        Self {
            event,
            user_id,
            occurred_at: Utc::now(),
        }
    }
}

/// Roles allowed to perform an operation.
///
/// An empty set admits any authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredRoles(Vec<Role>);

impl RequiredRoles {
    /// No role requirement; authentication alone suffices.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn any_of(roles: &[Role]) -> Self {
        Self(roles.to_vec())
    }

    pub fn admin() -> Self {
        Self::any_of(&[Role::Admin])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn permits(&self, role: Role) -> bool {
        self.is_empty() || self.0.contains(&role)
    }
}
