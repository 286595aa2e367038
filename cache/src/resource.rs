use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// System of record for a cacheable resource type.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// Resource identifier; its `Display` form is used in cache keys.
    type Id: fmt::Display + Send + Sync;

    /// Stored resource. Must round-trip through JSON for caching.
    type Resource: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Input accepted by `create`.
    type Draft: Send;

    /// Store failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve a resource by identifier.
    ///
    /// # Returns
    /// Optional resource (None if not found)
    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Resource>, Self::Error>;

    /// Retrieve every resource.
    async fn find_all(&self) -> Result<Vec<Self::Resource>, Self::Error>;

    /// Persist a new resource.
    async fn create(&self, draft: Self::Draft) -> Result<Self::Resource, Self::Error>;

    /// Persist the full state of an existing resource.
    async fn save(&self, resource: Self::Resource) -> Result<Self::Resource, Self::Error>;

    /// Remove a resource.
    ///
    /// # Returns
    /// Number of rows affected (0 when the resource did not exist)
    async fn delete(&self, id: &Self::Id) -> Result<u64, Self::Error>;
}

/// Partial update merged into a loaded resource.
pub trait Patch<R> {
    /// Overwrite the fields of `resource` that this patch carries.
    fn apply(self, resource: &mut R);
}
