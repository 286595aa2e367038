//! Cache-aside persistence library
//!
//! Provides a read-through, write-invalidate layer between a service and its
//! system of record:
//! - [`CacheStore`] port with Redis and in-process backends
//! - [`ResourceStore`] port for the system of record
//! - [`CacheAsideStore`] coordinating the two
//!
//! # Examples
//!
//! ```
//! use cache::{CacheStore, MemoryCache};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = MemoryCache::new();
//! cache.set_with_expiry("task_1", "{}", Duration::from_secs(60)).await.unwrap();
//! assert_eq!(cache.get("task_1").await.unwrap(), Some("{}".to_string()));
//! # }
//! ```

pub mod aside;
pub mod error;
pub mod memory;
pub mod redis_cache;
pub mod resource;
pub mod store;

pub use aside::CacheAsideStore;
pub use aside::DEFAULT_TTL;
pub use error::CacheAsideError;
pub use error::CacheError;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use redis_cache::RedisConfig;
pub use resource::Patch;
pub use resource::ResourceStore;
pub use store::CacheStore;
