use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Key/value cache holding serialized values with a time-to-live.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Read a value.
    ///
    /// # Returns
    /// The stored value, or None when absent or expired
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value that expires after `ttl`.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    /// * `Unavailable` - Backend could not be reached
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
