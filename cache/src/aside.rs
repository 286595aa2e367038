//! Cache-aside access to a [`ResourceStore`].
//!
//! Reads consult the cache first and populate it on a miss. Writes go to the
//! store and then refresh or invalidate every key that could hold a stale
//! copy: the per-resource key and the collection key. Reads never invalidate.
//!
//! The cache is fail-open: any cache error is logged and the operation
//! proceeds against the store alone. Store errors are returned to the caller.
//!
//! Keys are `"<prefix>_<id>"` and `"<prefix>_all"`.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CacheAsideError;
use crate::resource::Patch;
use crate::resource::ResourceStore;
use crate::store::CacheStore;

/// Time-to-live applied to every cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

enum CacheRead<T> {
    Hit(T),
    Miss,
    Unavailable,
}

pub struct CacheAsideStore<R, C>
where
    R: ResourceStore,
    C: CacheStore,
{
    store: Arc<R>,
    cache: Arc<C>,
    prefix: String,
    ttl: Duration,
}

impl<R, C> CacheAsideStore<R, C>
where
    R: ResourceStore,
    C: CacheStore,
{
    /// Create a cache-aside store with the default TTL.
    ///
    /// # Arguments
    /// * `store` - System of record
    /// * `cache` - Cache backend
    /// * `prefix` - Key prefix for this resource type (e.g. `"task"`)
    pub fn new(store: Arc<R>, cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            cache,
            prefix: prefix.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key_for(&self, id: &R::Id) -> String {
        format!("{}_{}", self.prefix, id)
    }

    pub fn collection_key(&self) -> String {
        format!("{}_all", self.prefix)
    }

    /// Fetch one resource, serving it from the cache when possible.
    ///
    /// # Errors
    /// * `NotFound` - Store has no resource with this id
    /// * `Store` - Store lookup failed
    pub async fn get_one(&self, id: &R::Id) -> Result<R::Resource, CacheAsideError<R::Error>> {
        let key = self.key_for(id);

        let cache_available = match self.read_cached(&key).await {
            CacheRead::Hit(resource) => return Ok(resource),
            CacheRead::Miss => true,
            CacheRead::Unavailable => false,
        };

        let resource = self
            .store
            .find_by_id(id)
            .await
            .map_err(CacheAsideError::Store)?
            .ok_or_else(|| CacheAsideError::NotFound(id.to_string()))?;

        if cache_available {
            self.write_cached(&key, &resource).await;
        }

        Ok(resource)
    }

    /// Fetch every resource, serving the collection from the cache when possible.
    ///
    /// # Errors
    /// * `Store` - Store lookup failed
    pub async fn get_all(&self) -> Result<Vec<R::Resource>, CacheAsideError<R::Error>> {
        let key = self.collection_key();

        let cache_available = match self.read_cached(&key).await {
            CacheRead::Hit(resources) => return Ok(resources),
            CacheRead::Miss => true,
            CacheRead::Unavailable => false,
        };

        let resources = self
            .store
            .find_all()
            .await
            .map_err(CacheAsideError::Store)?;

        if cache_available {
            self.write_cached(&key, &resources).await;
        }

        Ok(resources)
    }

    /// Create a resource and invalidate the collection key.
    ///
    /// The new resource is not cached under its own key.
    ///
    /// # Errors
    /// * `Store` - Store write failed
    pub async fn create(
        &self,
        draft: R::Draft,
    ) -> Result<R::Resource, CacheAsideError<R::Error>> {
        let created = self
            .store
            .create(draft)
            .await
            .map_err(CacheAsideError::Store)?;

        self.invalidate(&self.collection_key()).await;

        Ok(created)
    }

    /// Apply a patch to the stored resource and persist it.
    ///
    /// The current value is read from the store, never from the cache, so the
    /// patch is not merged into a stale copy. The per-resource key is
    /// refreshed with the saved value and the collection key is invalidated.
    /// If the refresh cannot be written the per-resource key is invalidated
    /// instead.
    ///
    /// # Errors
    /// * `NotFound` - Store has no resource with this id
    /// * `Store` - Store lookup or write failed
    pub async fn update<P>(
        &self,
        id: &R::Id,
        patch: P,
    ) -> Result<R::Resource, CacheAsideError<R::Error>>
    where
        P: Patch<R::Resource> + Send,
    {
        let mut resource = self
            .store
            .find_by_id(id)
            .await
            .map_err(CacheAsideError::Store)?
            .ok_or_else(|| CacheAsideError::NotFound(id.to_string()))?;

        patch.apply(&mut resource);

        let saved = self
            .store
            .save(resource)
            .await
            .map_err(CacheAsideError::Store)?;

        let key = self.key_for(id);
        if !self.write_cached(&key, &saved).await {
            self.invalidate(&key).await;
        }
        self.invalidate(&self.collection_key()).await;

        Ok(saved)
    }

    /// Delete a resource and invalidate its key and the collection key.
    ///
    /// # Errors
    /// * `NotFound` - Store reported zero rows affected; no key is touched
    /// * `Store` - Store delete failed
    pub async fn delete(&self, id: &R::Id) -> Result<(), CacheAsideError<R::Error>> {
        let affected = self
            .store
            .delete(id)
            .await
            .map_err(CacheAsideError::Store)?;

        if affected == 0 {
            return Err(CacheAsideError::NotFound(id.to_string()));
        }

        self.invalidate(&self.key_for(id)).await;
        self.invalidate(&self.collection_key()).await;

        Ok(())
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> CacheRead<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!(key = %key, "Cache hit");
                    CacheRead::Hit(value)
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    CacheRead::Miss
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "Cache miss");
                CacheRead::Miss
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, falling back to store");
                CacheRead::Unavailable
            }
        }
    }

    /// Returns whether the entry was written.
    async fn write_cached<T: Serialize + Sync>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize cache entry");
                return false;
            }
        };

        match self.cache.set_with_expiry(key, &raw, self.ttl).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache write failed");
                false
            }
        }
    }

    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!(
                key = %key,
                error = %e,
                "Cache invalidation failed, entry may stay stale until TTL expiry"
            );
        }
    }
}
