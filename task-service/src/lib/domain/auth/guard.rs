use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::UnauthorizedReason;
use crate::domain::auth::models::RequiredRoles;
use crate::domain::auth::ports::AuthorizationPort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Resolves access tokens to users and enforces role requirements.
pub struct AuthorizationGuard<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthorizationGuard<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthorizationPort for AuthorizationGuard<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .authenticator
            .verify_access_token(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                match e {
                    JwtError::TokenExpired => AuthError::Unauthorized(UnauthorizedReason::Expired),
                    JwtError::TokenMalformed(_) => {
                        AuthError::Unauthorized(UnauthorizedReason::Invalid)
                    }
                    JwtError::EncodingFailed(_) => {
                        AuthError::Unauthorized(UnauthorizedReason::Generic)
                    }
                }
            })?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|_| AuthError::Unauthorized(UnauthorizedReason::Invalid))?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::Unauthorized(UnauthorizedReason::Generic))?;

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Inactive user denied");
            return Err(AuthError::Unauthorized(UnauthorizedReason::Inactive));
        }

        Ok(user)
    }

    fn authorize(&self, user: &User, required: &RequiredRoles) -> Result<(), AuthError> {
        if required.permits(user.role) {
            Ok(())
        } else {
            tracing::info!(user_id = %user.id, role = %user.role, "Role requirement not met");
            Err(AuthError::Forbidden)
        }
    }
}
