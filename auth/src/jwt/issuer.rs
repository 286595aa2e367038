use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::JwtError;

/// HMAC key used to sign and verify one kind of token.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Access and refresh tokens must use different secrets
pub struct TokenKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKey {
    /// Build a key from a shared secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// Signs and verifies self-contained tokens.
///
/// Uses HS256 (HMAC with SHA-256); the algorithm identifier travels in the
/// token header. Expiry is checked with zero leeway.
pub struct TokenIssuer {
    algorithm: Algorithm,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for a subject, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - User identifier placed in `sub`
    /// * `username` - Username placed in the claims
    /// * `ttl` - Token lifetime
    /// * `key` - Signing key
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        username: &str,
        ttl: Duration,
        key: &TokenKey,
    ) -> Result<IssuedToken, JwtError> {
        let claims = TokenClaims::for_user(subject, username, Utc::now(), ttl);
        let token = self.encode(&claims, key)?;

        Ok(IssuedToken { token, claims })
    }

    /// Sign explicit claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &TokenClaims, key: &TokenKey) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &key.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is past `exp`
    /// * `TokenMalformed` - Signature, algorithm, or structure is invalid
    pub fn verify(&self, token: &str, key: &TokenKey) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<TokenClaims>(token, &key.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::TokenMalformed(e.to_string()),
            })
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}
