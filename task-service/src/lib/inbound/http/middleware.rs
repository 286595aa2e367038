use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::UnauthorizedReason;
use crate::domain::auth::models::RequiredRoles;
use crate::domain::auth::ports::AuthorizationPort;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.as_str().to_string(),
            role: user.role,
        }
    }
}

/// Role requirement of one group of routes, checked by [`require_access`].
#[derive(Clone)]
pub struct RouteGuard {
    authorizer: Arc<dyn AuthorizationPort>,
    required_roles: RequiredRoles,
}

impl RouteGuard {
    pub fn new(authorizer: Arc<dyn AuthorizationPort>, required_roles: RequiredRoles) -> Self {
        Self {
            authorizer,
            required_roles,
        }
    }
}

/// Middleware that authenticates the bearer token, then enforces the route's roles.
///
/// Authorization only runs for an authenticated caller. On success the
/// caller is added to request extensions as [`AuthenticatedUser`].
pub async fn require_access(
    State(guard): State<RouteGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let user = guard.authorizer.authenticate(&token).await.map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Authentication failed");
        ApiError::from(e)
    })?;

    guard
        .authorizer
        .authorize(&user, &guard.required_roles)
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser::from(&user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<String, ApiError> {
    let missing = || ApiError::from(AuthError::Unauthorized(UnauthorizedReason::Missing));

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(missing)?
        .to_str()
        .map_err(|_| missing())?;

    header_value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(missing)
}
