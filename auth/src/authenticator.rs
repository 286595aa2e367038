use chrono::Duration;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenClaims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKey;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication coordinator combining password hashing and token issuance.
///
/// Holds two independent signing keys: one for access tokens and one for
/// refresh tokens. A token signed with one key never verifies with the other.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    access_key: TokenKey,
    refresh_key: TokenKey,
}

/// Access and refresh token issued together at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `access_secret` - Secret key for access token signing
    /// * `refresh_secret` - Secret key for refresh token signing
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self::with_hasher(PasswordHasher::new(), access_secret, refresh_secret)
    }

    /// Create an authenticator with a custom password hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        access_secret: &[u8],
        refresh_secret: &[u8],
    ) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(),
            access_key: TokenKey::from_secret(access_secret),
            refresh_key: TokenKey::from_secret(refresh_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access token and a refresh token for the same subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_pair(&self, subject: &str, username: &str) -> Result<TokenPair, JwtError> {
        let access = self.issue_access_token(subject, username)?;
        let refresh = self.token_issuer.issue(
            subject,
            username,
            Duration::days(REFRESH_TOKEN_TTL_DAYS),
            &self.refresh_key,
        )?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }

    /// Issue a single access token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(
        &self,
        subject: &str,
        username: &str,
    ) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(
            subject,
            username,
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            &self.access_key,
        )
    }

    /// Validate an access token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `TokenMalformed` - Token is invalid or was signed with another key
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.token_issuer.verify(token, &self.access_key)
    }

    /// Validate a refresh token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `TokenMalformed` - Token is invalid or was signed with another key
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.token_issuer.verify(token, &self.refresh_key)
    }
}
