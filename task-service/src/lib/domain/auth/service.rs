use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuditEvent;
use crate::domain::auth::models::AuditRecord;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuditSink;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for registration, login and token refresh.
///
/// Holds no per-user state; every call works from its arguments and the
/// user store.
pub struct AuthService<UR, AS>
where
    UR: UserRepository,
    AS: AuditSink,
{
    repository: Arc<UR>,
    audit_sink: Arc<AS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, AS> AuthService<UR, AS>
where
    UR: UserRepository,
    AS: AuditSink,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `audit_sink` - Destination for audit records
    /// * `authenticator` - Password hasher and token keys
    pub fn new(repository: Arc<UR>, audit_sink: Arc<AS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            audit_sink,
            authenticator,
        }
    }

    async fn reject_login(&self, user_id: Option<UserId>) -> AuthError {
        self.log_audit_event(AuditEvent::LoginFailed, user_id).await;
        AuthError::InvalidCredentials
    }

    async fn reject_refresh(&self, user_id: Option<UserId>) -> AuthError {
        self.log_audit_event(AuditEvent::RefreshRejected, user_id).await;
        AuthError::InvalidRefreshToken
    }
}

#[async_trait]
impl<UR, AS> AuthServicePort for AuthService<UR, AS>
where
    UR: UserRepository,
    AS: AuditSink,
{
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let Ok(username) = Username::new(username.to_string()) else {
            return Err(self.reject_login(None).await);
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            return Err(self.reject_login(None).await);
        };

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            return Err(self.reject_login(Some(user.id)).await);
        }

        Ok(user)
    }

    async fn login(&self, user: &User) -> Result<TokenPair, AuthError> {
        let pair = self
            .authenticator
            .issue_token_pair(&user.id.to_string(), user.username.as_str())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        self.log_audit_event(AuditEvent::LoginSucceeded, Some(user.id))
            .await;

        Ok(pair)
    }

    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User::register(command.username, command.email, password_hash);
        let created = self.repository.create(user).await?;

        tracing::info!(user_id = %created.id, username = %created.username, "User registered");
        self.log_audit_event(AuditEvent::Registered, Some(created.id))
            .await;

        Ok(created)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AuthError> {
        let claims = match self.authenticator.verify_refresh_token(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Refresh token rejected");
                return Err(self.reject_refresh(None).await);
            }
        };

        let Ok(user_id) = UserId::from_string(&claims.sub) else {
            return Err(self.reject_refresh(None).await);
        };

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let access = self
            .authenticator
            .issue_access_token(&user.id.to_string(), user.username.as_str())
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        self.log_audit_event(AuditEvent::TokenRefreshed, Some(user.id))
            .await;

        Ok(access)
    }

    async fn log_audit_event(&self, event: AuditEvent, user_id: Option<UserId>) {
        let record = AuditRecord::new(event, user_id);
        let sink = Arc::clone(&self.audit_sink);

        // The caller never waits on the sink
        tokio::spawn(async move {
            if let Err(e) = sink.record(&record).await {
                tracing::warn!(event = %record.event, error = %e, "Failed to record audit event");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::auth::errors::AuditError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;
    use crate::user::errors::UserError;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestAuditSink {}

        #[async_trait]
        impl AuditSink for TestAuditSink {
            async fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
        }
    }

    const ACCESS_SECRET: &[u8] = b"test_access_secret_at_least_32_bytes!";
    const REFRESH_SECRET: &[u8] = b"test_refresh_secret_at_least_32_bytes";

    fn authenticator() -> Arc<Authenticator> {
        let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
        Arc::new(Authenticator::with_hasher(
            hasher,
            ACCESS_SECRET,
            REFRESH_SECRET,
        ))
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        User::register(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            authenticator.hash_password(password).unwrap(),
        )
    }

    struct HangingAuditSink;

    #[async_trait]
    impl AuditSink for HangingAuditSink {
        async fn record(&self, _record: &AuditRecord) -> Result<(), AuditError> {
            std::future::pending().await
        }
    }

    /// Let detached audit tasks run before mock expectations are checked.
    async fn settle_audit() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn expect_audit(sink: &mut MockTestAuditSink, event: AuditEvent) {
        sink.expect_record()
            .withf(move |record| record.event == event)
            .times(1)
            .returning(|_| Ok(()));
    }

    #[tokio::test]
    async fn test_validate_credentials_success() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "correct_password");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut sink = MockTestAuditSink::new();
        sink.expect_record().times(0);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator);

        let result = service
            .validate_credentials("alice", "correct_password")
            .await
            .unwrap();
        assert_eq!(result.id, user_id);
    }

    #[tokio::test]
    async fn test_validate_credentials_wrong_password() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "correct_password");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut sink = MockTestAuditSink::new();
        sink.expect_record()
            .withf(move |record| {
                record.event == AuditEvent::LoginFailed && record.user_id == Some(user_id)
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator);

        let result = service.validate_credentials("alice", "wrong_password").await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_validate_credentials_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::LoginFailed);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator());

        let result = service.validate_credentials("nobody", "password").await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_validate_credentials_unparsable_username_skips_lookup() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_username().times(0);

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::LoginFailed);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator());

        let result = service.validate_credentials("a b", "password").await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_pair() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "password");

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::LoginSucceeded);

        let service = AuthService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(sink),
            Arc::clone(&authenticator),
        );

        let pair = service.login(&user).await.unwrap();
        settle_audit().await;

        let access = authenticator.verify_access_token(&pair.access_token).unwrap();
        let refresh = authenticator
            .verify_refresh_token(&pair.refresh_token)
            .unwrap();
        assert_eq!(access.sub, user.id.to_string());
        assert_eq!(access.username, "alice");
        assert_eq!(refresh.sub, user.id.to_string());
    }

    #[tokio::test]
    async fn test_register_creates_active_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "alice"
                    && user.role == Role::User
                    && user.is_active
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::Registered);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator());

        let command = RegisterCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let user = service.register(command).await.unwrap();
        settle_audit().await;
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(user.username.to_string()))
        });

        let mut sink = MockTestAuditSink::new();
        sink.expect_record().times(0);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator());

        let command = RegisterCommand::new(
            Username::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "password123".to_string(),
        );

        let result = service.register(command).await;
        settle_audit().await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::DuplicateUsername("alice".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_subject() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "password");
        let user_id = user.id;
        let pair = authenticator
            .issue_token_pair(&user_id.to_string(), "alice")
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::TokenRefreshed);

        let service = AuthService::new(
            Arc::new(repository),
            Arc::new(sink),
            Arc::clone(&authenticator),
        );

        let access = service.refresh(&pair.refresh_token).await.unwrap();
        settle_audit().await;
        assert_eq!(access.claims.sub, user_id.to_string());
        assert!(authenticator.verify_access_token(&access.token).is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let authenticator = authenticator();
        let access = authenticator
            .issue_access_token(&UserId::new().to_string(), "alice")
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::RefreshRejected);

        let service = AuthService::new(
            Arc::new(repository),
            Arc::new(sink),
            Arc::clone(&authenticator),
        );

        let result = service.refresh(&access.token).await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_refresh_expired_and_malformed_collapse() {
        let issuer = auth::TokenIssuer::new();
        let refresh_key = auth::TokenKey::from_secret(REFRESH_SECRET);
        let expired = issuer
            .issue(
                &UserId::new().to_string(),
                "alice",
                Duration::seconds(-60),
                &refresh_key,
            )
            .unwrap();

        let mut sink = MockTestAuditSink::new();
        sink.expect_record().times(2).returning(|_| Ok(()));

        let service = AuthService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(sink),
            authenticator(),
        );

        assert_eq!(
            service.refresh(&expired.token).await.unwrap_err(),
            AuthError::InvalidRefreshToken
        );
        assert_eq!(
            service.refresh("not.a.token").await.unwrap_err(),
            AuthError::InvalidRefreshToken
        );
        settle_audit().await;
    }

    #[tokio::test]
    async fn test_refresh_unparsable_subject() {
        let issuer = auth::TokenIssuer::new();
        let refresh_key = auth::TokenKey::from_secret(REFRESH_SECRET);
        let issued = issuer
            .issue("not-a-uuid", "alice", Duration::days(1), &refresh_key)
            .unwrap();

        let mut sink = MockTestAuditSink::new();
        expect_audit(&mut sink, AuditEvent::RefreshRejected);

        let service = AuthService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(sink),
            authenticator(),
        );

        let result = service.refresh(&issued.token).await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidRefreshToken);
    }

    #[tokio::test]
    async fn test_refresh_vanished_user() {
        let authenticator = authenticator();
        let pair = authenticator
            .issue_token_pair(&UserId::new().to_string(), "alice")
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut sink = MockTestAuditSink::new();
        sink.expect_record().times(0);

        let service = AuthService::new(Arc::new(repository), Arc::new(sink), authenticator);

        let result = service.refresh(&pair.refresh_token).await;
        settle_audit().await;
        assert_eq!(result.unwrap_err(), AuthError::UserNotFound);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_login() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "password");

        let mut sink = MockTestAuditSink::new();
        sink.expect_record()
            .times(1)
            .returning(|_| Err(AuditError::WriteFailed("disk full".to_string())));

        let service = AuthService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(sink),
            authenticator,
        );

        assert!(service.login(&user).await.is_ok());
        settle_audit().await;
    }

    #[tokio::test]
    async fn test_hanging_audit_sink_does_not_block_auth_calls() {
        let authenticator = authenticator();
        let user = stored_user(&authenticator, "password");
        let pair = authenticator
            .issue_token_pair(&user.id.to_string(), "alice")
            .unwrap();

        let stored = user.clone();
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AuthService::new(
            Arc::new(repository),
            Arc::new(HangingAuditSink),
            authenticator,
        );

        let deadline = std::time::Duration::from_secs(2);

        let login = tokio::time::timeout(deadline, service.login(&user)).await;
        assert!(matches!(login, Ok(Ok(_))));

        let refreshed = tokio::time::timeout(deadline, service.refresh(&pair.refresh_token)).await;
        assert!(matches!(refreshed, Ok(Ok(_))));

        let rejected = tokio::time::timeout(deadline, service.refresh("not.a.token")).await;
        assert_eq!(rejected.unwrap().unwrap_err(), AuthError::InvalidRefreshToken);
    }
}
