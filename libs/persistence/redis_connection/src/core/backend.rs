use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    cache::{
        memory::MemoryCache,
        redis_cache::RedisCache,
        store::{CacheResult, CacheStore},
    },
    config::{CachePolicy, MemoryConfig},
};

/// Represents the cache backend selected at startup
#[derive(Clone)]
pub enum CacheBackend {
    /// Redis backend using a deadpool connection pool
    Redis(RedisCache),

    /// In-process moka cache
    Memory(MemoryCache),
}

impl CacheBackend {
    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Redis(_) => "redis",
            CacheBackend::Memory(_) => "memory",
        }
    }
}

impl From<deadpool_redis::Pool> for CacheBackend {
    fn from(pool: deadpool_redis::Pool) -> Self {
        CacheBackend::Redis(RedisCache::new(pool))
    }
}

impl From<MemoryConfig> for CacheBackend {
    fn from(config: MemoryConfig) -> Self {
        CacheBackend::Memory(MemoryCache::new(&config))
    }
}

#[async_trait]
impl CacheStore for CacheBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        match self {
            CacheBackend::Redis(cache) => cache.get(key).await,
            CacheBackend::Memory(cache) => cache.get(key).await,
        }
    }

    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(cache) => cache.set(key, value, policy).await,
            CacheBackend::Memory(cache) => cache.set(key, value, policy).await,
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        match self {
            CacheBackend::Redis(cache) => cache.delete(key).await,
            CacheBackend::Memory(cache) => cache.delete(key).await,
        }
    }
}
