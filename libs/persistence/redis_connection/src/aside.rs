use std::{future::Future, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    cache::store::{CacheError, CacheResult, CacheStore},
    config::CachePolicy,
    core::value::{from_bytes, to_bytes},
};

/// Read-through cache over any [`CacheStore`].
///
/// Reads consult the cache first and fall back to a producer; writes to the
/// underlying data go around the cache and are followed by [`invalidate`].
///
/// [`invalidate`]: CacheAside::invalidate
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
}

impl CacheAside {
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Serializes `value` and overwrites the entry under `key`.
    #[instrument(skip(self, value))]
    pub async fn set<T>(
        &self, key: &str, value: &T, policy: &CachePolicy,
    ) -> CacheResult<()>
    where
        T: Serialize + Sync,
    {
        let bytes = to_bytes(value)?;
        self.store.set(key, bytes, policy).await
    }

    /// `None` for a missing key or an empty payload.
    #[instrument(skip(self))]
    pub async fn try_get<T>(&self, key: &str) -> CacheResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.store.get(key).await? {
            Some(bytes) if !bytes.is_empty() => from_bytes(key, &bytes).map(Some),
            _ => Ok(None),
        }
    }

    /// Deletes the entry; an absent key is not an error.
    #[instrument(skip(self))]
    pub async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.store.delete(key).await
    }

    /// Returns the cached value or runs `producer` once and caches its
    /// result.
    ///
    /// A producer result of `None` is returned as is and not cached. Cache
    /// transport failures on read fall through to the producer; failures on
    /// write are logged and the produced value is still returned. A payload
    /// that is present but cannot be decoded is reported as an error.
    #[instrument(skip(self, policy, producer))]
    pub async fn get_or_set<T, E, F, Fut>(
        &self, key: &str, policy: &CachePolicy, producer: F,
    ) -> Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned + Sync,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        match self.try_get::<T>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key: {}", key);
                return Ok(Some(value));
            }
            Ok(None) => {
                debug!("Cache miss for key: {}", key);
            }
            Err(e) if e.is_decode() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "Cache read failed for key: {}", key);
            }
        }

        let Some(value) = producer().await?
        else {
            return Ok(None);
        };

        if let Err(e) = self.set(key, &value, policy).await {
            warn!(error = %e, "Cache write failed for key: {}", key);
        }

        Ok(Some(value))
    }
}
