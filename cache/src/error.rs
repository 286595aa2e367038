use thiserror::Error;

/// Errors raised by a cache backend.
///
/// These never reach callers of [`CacheAsideStore`](crate::CacheAsideStore):
/// a failing cache degrades to reading the system of record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache value could not be (de)serialized: {0}")]
    Serialization(String),
}

/// Errors raised by [`CacheAsideStore`](crate::CacheAsideStore) operations.
#[derive(Debug, Error)]
pub enum CacheAsideError<E>
where
    E: std::error::Error + 'static,
{
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(E),
}
