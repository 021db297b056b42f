use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use moka::{Expiry, future::Cache};
use tracing::instrument;

use super::store::{CacheResult, CacheStore};
use crate::config::{CachePolicy, MemoryConfig};

#[derive(Clone)]
struct MemoryEntry {
    data: Bytes,
    policy: CachePolicy,
}

/// Applies each entry's own sliding/absolute expiration.
struct PolicyExpiry;

impl Expiry<String, MemoryEntry> for PolicyExpiry {
    fn expire_after_create(
        &self, _key: &String, value: &MemoryEntry, _created_at: Instant,
    ) -> Option<Duration> {
        value.policy.initial_ttl()
    }

    fn expire_after_read(
        &self, _key: &String, value: &MemoryEntry, read_at: Instant,
        duration_until_expiry: Option<Duration>, last_modified_at: Instant,
    ) -> Option<Duration> {
        let Some(sliding) = value.policy.sliding
        else {
            return duration_until_expiry;
        };
        match value.policy.absolute {
            Some(absolute) => {
                let age = read_at.saturating_duration_since(last_modified_at);
                Some(sliding.min(absolute.saturating_sub(age)))
            }
            None => Some(sliding),
        }
    }

    fn expire_after_update(
        &self, _key: &String, value: &MemoryEntry, _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.policy.initial_ttl()
    }
}

/// In-process cache store backed by moka.
#[derive(Clone)]
pub struct MemoryCache {
    memory: Cache<String, MemoryEntry>,
}

impl MemoryCache {
    pub fn new(config: &MemoryConfig) -> Self {
        let memory = Cache::builder()
            .max_capacity(config.capacity)
            .expire_after(PolicyExpiry)
            .build();
        Self { memory }
    }
}

impl Default for MemoryCache {
    fn default() -> Self { Self::new(&MemoryConfig::default()) }
}

#[async_trait]
impl CacheStore for MemoryCache {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> CacheResult<Option<Bytes>> {
        Ok(self.memory.get(key).await.map(|entry| entry.data))
    }

    #[instrument(skip(self, value))]
    async fn set(
        &self, key: &str, value: Bytes, policy: &CachePolicy,
    ) -> CacheResult<()> {
        self.memory
            .insert(
                key.to_string(),
                MemoryEntry {
                    data: value,
                    policy: *policy,
                },
            )
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.memory.invalidate(key).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(s: &str) -> Bytes { Bytes::from(s.to_string()) }

    #[tokio::test]
    async fn set_get_delete() {
        let cache = MemoryCache::default();
        let policy = CachePolicy::never_expire();

        assert_eq!(cache.get("all_groups").await.unwrap(), None);

        cache.set("all_groups", payload("[]"), &policy).await.unwrap();
        assert_eq!(cache.get("all_groups").await.unwrap(), Some(payload("[]")));

        cache.delete("all_groups").await.unwrap();
        assert_eq!(cache.get("all_groups").await.unwrap(), None);

        // deleting an absent key is fine
        cache.delete("all_groups").await.unwrap();
    }

    #[tokio::test]
    async fn set_overwrites() {
        let cache = MemoryCache::default();
        let policy = CachePolicy::never_expire();
        cache.set("k", payload("1"), &policy).await.unwrap();
        cache.set("k", payload("2"), &policy).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(payload("2")));
    }

    #[tokio::test]
    async fn absolute_expiration_removes_entry() {
        let cache = MemoryCache::default();
        let policy = CachePolicy::new(None, Some(Duration::from_millis(100)));
        cache.set("k", payload("v"), &policy).await.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn sliding_expiration_removes_idle_entry() {
        let cache = MemoryCache::default();
        let policy = CachePolicy::new(Some(Duration::from_millis(100)), None);
        cache.set("k", payload("v"), &policy).await.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[test]
    fn read_extends_sliding_window_up_to_absolute_deadline() {
        let expiry = PolicyExpiry;
        let entry = MemoryEntry {
            data: payload("v"),
            policy: CachePolicy::new(
                Some(Duration::from_secs(10)),
                Some(Duration::from_secs(30)),
            ),
        };
        let written = Instant::now();
        let key = "k".to_string();

        let early = expiry.expire_after_read(
            &key,
            &entry,
            written + Duration::from_secs(1),
            Some(Duration::from_secs(9)),
            written,
        );
        assert_eq!(early, Some(Duration::from_secs(10)));

        let late = expiry.expire_after_read(
            &key,
            &entry,
            written + Duration::from_secs(25),
            Some(Duration::from_secs(5)),
            written,
        );
        assert_eq!(late, Some(Duration::from_secs(5)));
    }
}
