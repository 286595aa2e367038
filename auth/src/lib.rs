//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (Argon2id)
//! - Signed token issuance and verification
//! - Dual-key access/refresh token coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenKey};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new();
//! let key = TokenKey::from_secret(b"secret_key_at_least_32_bytes_long!");
//! let issued = issuer.issue("user123", "alice", Duration::minutes(15), &key).unwrap();
//! let claims = issuer.verify(&issued.token, &key).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(
//!     b"access_secret_at_least_32_bytes_long",
//!     b"refresh_secret_at_least_32_bytes_lon",
//! );
//!
//! let hash = auth.hash_password("password123").unwrap();
//! assert!(auth.verify_password("password123", &hash));
//!
//! let pair = auth.issue_token_pair("user123", "alice").unwrap();
//! let claims = auth.verify_refresh_token(&pair.refresh_token).unwrap();
//! let access = auth.issue_access_token(&claims.sub, &claims.username).unwrap();
//! assert!(auth.verify_access_token(&access.token).is_ok());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::ACCESS_TOKEN_TTL_MINUTES;
pub use authenticator::REFRESH_TOKEN_TTL_DAYS;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenClaims;
pub use jwt::TokenIssuer;
pub use jwt::TokenKey;
pub use password::PasswordError;
pub use password::PasswordHasher;
