use async_trait::async_trait;
use bytes::Bytes;

use crate::config::CachePolicy;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to decode cached value under {key}: {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    /// A payload was present but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, CacheError::Deserialization { .. })
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Byte-level key/value store with per-entry expiration.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>>;

    /// Overwrites any existing entry under `key`.
    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()>;

    /// Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;
}
